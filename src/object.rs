//! Objects produced when evaluating the Monkey programming language.

use crate::ast;

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::error;
use std::fmt;
use std::rc::Rc;
use std::result;

/// Objects produced when evaluating Monkey source code, along with their
/// associated data if applicable.
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Null,
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Array),
    Hash(Hash),
    Function(Function),
    Builtin(Builtin),
    ReturnValue(Box<Object>),
}

impl Object {
    /// Produces the name of an `Object`'s type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "NULL",
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Null => write!(f, "null"),
            Object::Integer(i) => i.fmt(f),
            Object::Boolean(b) => b.fmt(f),
            Object::String(s) => s.fmt(f),
            Object::Array(a) => a.fmt(f),
            Object::Hash(h) => h.fmt(f),
            Object::Function(func) => func.fmt(f),
            Object::Builtin(b) => b.fmt(f),
            Object::ReturnValue(r) => write!(f, "return({})", r),
        }
    }
}

/// The object representation of a Monkey array.
#[derive(Clone, Debug, PartialEq)]
pub struct Array {
    pub elements: Vec<Object>,
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let elements: Vec<String> = self.elements.iter().map(|e| e.to_string()).collect();

        write!(f, "[{}]", elements.join(", "))
    }
}

/// The object representation of a Monkey hash.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hash {
    pub pairs: BTreeMap<Hashable, Object>,
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pairs: Vec<String> = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();

        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// The subset of objects which may be used as hash keys. Keying hashes by
/// the original value makes key equality structural, so distinct types can
/// never collide.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Hashable {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl Hashable {
    /// Produces a `Hashable` key from an `Object`, or `None` if objects of
    /// its type cannot be hash keys.
    pub fn from_object(obj: &Object) -> Option<Self> {
        match obj {
            Object::Integer(i) => Some(Hashable::Integer(*i)),
            Object::Boolean(b) => Some(Hashable::Boolean(*b)),
            Object::String(s) => Some(Hashable::String(s.clone())),

            _ => None,
        }
    }

    /// Recovers the `Object` this key was produced from.
    pub fn into_object(self) -> Object {
        match self {
            Hashable::Integer(i) => Object::Integer(i),
            Hashable::Boolean(b) => Object::Boolean(b),
            Hashable::String(s) => Object::String(s),
        }
    }
}

impl fmt::Display for Hashable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Hashable::Integer(i) => i.fmt(f),
            Hashable::Boolean(b) => b.fmt(f),
            Hashable::String(s) => s.fmt(f),
        }
    }
}

/// A shared, mutable reference to an `Environment` frame. Every closure
/// that captured a frame sees bindings added to it later.
pub type Env = Rc<RefCell<Environment>>;

/// An execution environment used when evaluating Monkey source code: a
/// frame of name bindings with an optional link to the enclosing frame.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    /// Creates a new top-level `Environment`.
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
            outer: None,
        }
    }

    /// Creates an enclosed `Environment` whose lookups fall through to
    /// `outer`, for use within a function call.
    pub fn new_enclosed(outer: Env) -> Self {
        Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    /// Wraps this `Environment` into a shared `Env` handle.
    pub fn into_env(self) -> Env {
        Rc::new(RefCell::new(self))
    }

    /// Retrieves the object bound to an identifier name, searching this
    /// frame and then each enclosing frame in turn.
    pub fn get(&self, name: &str) -> Option<Object> {
        match (self.store.get(name), &self.outer) {
            // We found a binding in this frame; no need to consult the
            // outer frame.
            (Some(obj), _) => Some(obj.clone()),
            // We did not find a binding; try the outer frame.
            (None, Some(outer)) => outer.borrow().get(name),
            // We found no binding and there is no outer frame.
            (None, None) => None,
        }
    }

    /// Binds an object to the identifier `name` in this frame only.
    pub fn set(&mut self, name: String, obj: Object) {
        self.store.insert(name, obj);
    }
}

/// The object representation of a Monkey function: a closure over the
/// environment it was defined in.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<String>,
    pub body: ast::BlockStatement,
    pub env: Env,
}

// The captured environment can contain the function itself, so the derived
// traits would recurse without end; both impls skip `env`.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "fn({}) {{\n{}\n}}", self.parameters.join(", "), self.body)
    }
}

/// The object representation of a built-in Monkey function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Builtin {
    Len,
    First,
    Last,
    Rest,
    Push,
}

impl Builtin {
    /// Constructs a built-in using its name.
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "len" => Some(Builtin::Len),
            "first" => Some(Builtin::First),
            "last" => Some(Builtin::Last),
            "rest" => Some(Builtin::Rest),
            "push" => Some(Builtin::Push),

            _ => None,
        }
    }

    /// Applies the appropriate built-in function on `args` to produce an
    /// `Object`.
    pub fn apply(&self, args: &[Object]) -> Result<Object> {
        match self {
            Builtin::Len => builtin_len(args),
            Builtin::First => builtin_first(args),
            Builtin::Last => builtin_last(args),
            Builtin::Rest => builtin_rest(args),
            Builtin::Push => builtin_push(args),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Builtin::Len => write!(f, "len"),
            Builtin::First => write!(f, "first"),
            Builtin::Last => write!(f, "last"),
            Builtin::Rest => write!(f, "rest"),
            Builtin::Push => write!(f, "push"),
        }
    }
}

fn builtin_len(args: &[Object]) -> Result<Object> {
    if args.len() != 1 {
        return Err(Error::WrongNumberOfArguments {
            got: args.len(),
            want: 1,
        });
    }

    match &args[0] {
        Object::String(s) => Ok(Object::Integer(s.len() as i64)),
        Object::Array(a) => Ok(Object::Integer(a.elements.len() as i64)),

        other => Err(Error::UnsupportedArgument(Builtin::Len, other.type_name())),
    }
}

fn builtin_first(args: &[Object]) -> Result<Object> {
    if args.len() != 1 {
        return Err(Error::WrongNumberOfArguments {
            got: args.len(),
            want: 1,
        });
    }

    match &args[0] {
        Object::Array(a) => Ok(a.elements.first().cloned().unwrap_or(Object::Null)),

        other => Err(Error::NotAnArray(Builtin::First, other.type_name())),
    }
}

fn builtin_last(args: &[Object]) -> Result<Object> {
    if args.len() != 1 {
        return Err(Error::WrongNumberOfArguments {
            got: args.len(),
            want: 1,
        });
    }

    match &args[0] {
        Object::Array(a) => Ok(a.elements.last().cloned().unwrap_or(Object::Null)),

        other => Err(Error::NotAnArray(Builtin::Last, other.type_name())),
    }
}

fn builtin_rest(args: &[Object]) -> Result<Object> {
    if args.len() != 1 {
        return Err(Error::WrongNumberOfArguments {
            got: args.len(),
            want: 1,
        });
    }

    match &args[0] {
        // All but the first element, copied into a fresh array; the input
        // array is never modified.
        Object::Array(a) if !a.elements.is_empty() => Ok(Object::Array(Array {
            elements: a.elements[1..].to_vec(),
        })),
        Object::Array(_) => Ok(Object::Null),

        other => Err(Error::NotAnArray(Builtin::Rest, other.type_name())),
    }
}

fn builtin_push(args: &[Object]) -> Result<Object> {
    if args.len() != 2 {
        return Err(Error::WrongNumberOfArguments {
            got: args.len(),
            want: 2,
        });
    }

    match &args[0] {
        // The new element is appended to a fresh array; the input array is
        // never modified.
        Object::Array(a) => {
            let mut elements = a.elements.clone();
            elements.push(args[1].clone());

            Ok(Object::Array(Array { elements }))
        }

        other => Err(Error::NotAnArray(Builtin::Push, other.type_name())),
    }
}

/// A Result type specialized for use with an `Error`.
pub type Result<T> = result::Result<T, Error>;

/// Specifies the different classes of errors which may occur while applying
/// a built-in function.
#[derive(Debug, PartialEq)]
pub enum Error {
    WrongNumberOfArguments { got: usize, want: usize },
    UnsupportedArgument(Builtin, &'static str),
    NotAnArray(Builtin, &'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::WrongNumberOfArguments { got, want } => {
                write!(f, "wrong number of arguments. got={}, want={}", got, want)
            }
            Error::UnsupportedArgument(b, type_name) => {
                write!(f, "argument to `{}` not supported, got {}", b, type_name)
            }
            Error::NotAnArray(b, type_name) => {
                write!(f, "argument to `{}` must be ARRAY, got {}", b, type_name)
            }
        }
    }
}

impl error::Error for Error {}
