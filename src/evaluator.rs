//! An AST evaluator for the Monkey programming language.

use crate::ast;
use crate::object::{self, Env, Environment, Object};
use crate::token::Token;

use std::collections::BTreeMap;
use std::error;
use std::fmt;
use std::rc::Rc;
use std::result;

/// Evaluates an `ast::Node` against an environment and produces an
/// `object::Object`. Runtime errors short-circuit: any subexpression that
/// fails makes the whole evaluation fail with that error.
pub fn eval(node: ast::Node, env: &Env) -> Result<Object> {
    match node {
        ast::Node::Program(prog) => eval_program(prog, env),
        ast::Node::Statement(stmt) => match stmt {
            ast::Statement::Block(block) => eval_block_statement(block, env),
            ast::Statement::Expression(expr) => eval(ast::Node::Expression(expr), env),
            ast::Statement::Let(stmt) => {
                let obj = eval(ast::Node::Expression(stmt.value), env)?;

                // eval succeeded; capture this binding in our environment.
                // The binding itself contributes no value.
                env.borrow_mut().set(stmt.name, obj);
                Ok(Object::Null)
            }
            ast::Statement::Return(ret) => {
                let value = match ret.value {
                    Some(expr) => eval(ast::Node::Expression(expr), env)?,
                    None => Object::Null,
                };

                Ok(Object::ReturnValue(Box::new(value)))
            }
        },
        ast::Node::Expression(expr) => match expr {
            ast::Expression::Identifier(name) => eval_identifier(name, env),
            ast::Expression::Integer(i) => Ok(Object::Integer(i)),
            ast::Expression::Boolean(b) => Ok(Object::Boolean(b)),
            ast::Expression::String(s) => Ok(Object::String(s)),
            ast::Expression::Array(a) => Ok(Object::Array(object::Array {
                elements: eval_expressions(a.elements, env)?,
            })),
            ast::Expression::Hash(h) => eval_hash_literal(h, env),
            ast::Expression::Prefix(p) => eval_prefix_expression(p, env),
            ast::Expression::Infix(i) => eval_infix_expression(i, env),
            ast::Expression::If(expr) => eval_if_expression(expr, env),
            ast::Expression::Function(func) => Ok(Object::Function(object::Function {
                parameters: func.parameters,
                body: func.body,

                // Capture the definition-site environment by shared
                // reference: the closure sees bindings added later.
                env: Rc::clone(env),
            })),
            ast::Expression::Call(call) => eval_call_expression(call, env),
            ast::Expression::Index(index) => eval_index_expression(index, env),
        },
    }
}

/// Evaluates a program and returns the result.
fn eval_program(prog: ast::Program, env: &Env) -> Result<Object> {
    let mut result = Object::Null;

    for stmt in prog.statements {
        result = eval(ast::Node::Statement(stmt), env)?;

        // Handle early return statements if applicable, unwrapping the
        // inner value and terminating the program.
        if let Object::ReturnValue(value) = result {
            return Ok(*value);
        }
    }

    Ok(result)
}

/// Evaluates a block statement and returns the result.
fn eval_block_statement(block: ast::BlockStatement, env: &Env) -> Result<Object> {
    let mut result = Object::Null;

    for stmt in block.statements {
        result = eval(ast::Node::Statement(stmt), env)?;

        // Handle early return statements if applicable, but do not unwrap
        // the inner value so that only this block statement terminates, and
        // not the entire surrounding function or program.
        if let Object::ReturnValue(_) = result {
            return Ok(result);
        }
    }

    Ok(result)
}

/// Evaluates a prefix expression to produce an Object.
fn eval_prefix_expression(expr: ast::PrefixExpression, env: &Env) -> Result<Object> {
    // Evaluate the operand before applying the prefix operator.
    let right = eval(ast::Node::Expression(*expr.right), env)?;

    match expr.operator {
        // Logical negation.
        Token::Bang => match right {
            // Negate the input boolean.
            Object::Boolean(b) => Ok(Object::Boolean(!b)),
            // !null == true.
            Object::Null => Ok(Object::Boolean(true)),
            // Everything else is truthy, so negation produces false.
            _ => Ok(Object::Boolean(false)),
        },
        // Numeric negation.
        Token::Minus => match right {
            Object::Integer(i) => Ok(Object::Integer(i.wrapping_neg())),

            other => Err(Error::UnknownPrefixOperator {
                operator: Token::Minus,
                right: other.type_name(),
            }),
        },

        operator => Err(Error::UnknownPrefixOperator {
            operator,
            right: right.type_name(),
        }),
    }
}

/// Evaluates an infix expression to produce an Object.
fn eval_infix_expression(expr: ast::InfixExpression, env: &Env) -> Result<Object> {
    let left = eval(ast::Node::Expression(*expr.left), env)?;
    let right = eval(ast::Node::Expression(*expr.right), env)?;

    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => {
            eval_integer_infix_expression(expr.operator, l, r)
        }

        (Object::String(l), Object::String(r)) => match expr.operator {
            Token::Plus => Ok(Object::String(l + &r)),

            operator => Err(Error::UnknownInfixOperator {
                left: "STRING",
                operator,
                right: "STRING",
            }),
        },

        (left, right) => match expr.operator {
            // Structural comparison stands in for the reference equality of
            // the original implementation; mixed types compare unequal.
            Token::Equal => Ok(Object::Boolean(left == right)),
            Token::NotEqual => Ok(Object::Boolean(left != right)),

            operator if left.type_name() != right.type_name() => Err(Error::TypeMismatch {
                left: left.type_name(),
                operator,
                right: right.type_name(),
            }),
            operator => Err(Error::UnknownInfixOperator {
                left: left.type_name(),
                operator,
                right: right.type_name(),
            }),
        },
    }
}

// Evaluates `l (op) r` for integer operands. Arithmetic wraps on overflow,
// matching two's complement host integer behavior.
fn eval_integer_infix_expression(operator: Token, l: i64, r: i64) -> Result<Object> {
    match operator {
        Token::Plus => Ok(Object::Integer(l.wrapping_add(r))),
        Token::Minus => Ok(Object::Integer(l.wrapping_sub(r))),
        Token::Asterisk => Ok(Object::Integer(l.wrapping_mul(r))),
        Token::Slash => {
            if r == 0 {
                return Err(Error::DivisionByZero);
            }

            Ok(Object::Integer(l.wrapping_div(r)))
        }
        Token::LessThan => Ok(Object::Boolean(l < r)),
        Token::GreaterThan => Ok(Object::Boolean(l > r)),
        Token::Equal => Ok(Object::Boolean(l == r)),
        Token::NotEqual => Ok(Object::Boolean(l != r)),

        operator => Err(Error::UnknownInfixOperator {
            left: "INTEGER",
            operator,
            right: "INTEGER",
        }),
    }
}

/// Evaluates an if/else expression to produce an Object.
fn eval_if_expression(expr: ast::IfExpression, env: &Env) -> Result<Object> {
    let condition = eval(ast::Node::Expression(*expr.condition), env)?;

    if is_truthy(&condition) {
        eval_block_statement(expr.consequence, env)
    } else if let Some(alt) = expr.alternative {
        eval_block_statement(alt, env)
    } else {
        Ok(Object::Null)
    }
}

/// Evaluates an object bound to an identifier and returns the result. The
/// environment chain is consulted before built-ins, so user bindings may
/// shadow a built-in name.
fn eval_identifier(name: String, env: &Env) -> Result<Object> {
    if let Some(obj) = env.borrow().get(&name) {
        return Ok(obj);
    }

    match object::Builtin::lookup(&name) {
        Some(b) => Ok(Object::Builtin(b)),
        None => Err(Error::IdentifierNotFound(name)),
    }
}

/// Evaluates several expressions left-to-right and produces objects for
/// each of them. The first failing expression collapses the whole list to
/// its error.
fn eval_expressions(expressions: Vec<ast::Expression>, env: &Env) -> Result<Vec<Object>> {
    let mut results = vec![];

    for expr in expressions {
        results.push(eval(ast::Node::Expression(expr), env)?);
    }

    Ok(results)
}

/// Evaluates a hash literal, inserting pairs in source order.
fn eval_hash_literal(hash: ast::HashLiteral, env: &Env) -> Result<Object> {
    let mut pairs = BTreeMap::new();

    for (k, v) in hash.pairs {
        let key = eval(ast::Node::Expression(k), env)?;
        let key = match object::Hashable::from_object(&key) {
            Some(key) => key,
            None => return Err(Error::UnusableHashKey(key.type_name())),
        };

        let value = eval(ast::Node::Expression(v), env)?;
        pairs.insert(key, value);
    }

    Ok(Object::Hash(object::Hash { pairs }))
}

/// Evaluates a call expression by applying a function object or built-in
/// to its evaluated arguments.
fn eval_call_expression(call: ast::CallExpression, env: &Env) -> Result<Object> {
    let func = eval(ast::Node::Expression(*call.function), env)?;
    let args = eval_expressions(call.arguments, env)?;

    match func {
        Object::Function(func) => apply_function(func, args),
        // Built-ins use their own execution logic.
        Object::Builtin(b) => b.apply(&args).map_err(Error::Builtin),

        other => Err(Error::NotAFunction(other.type_name())),
    }
}

/// Applies a function with arguments to produce a result object.
fn apply_function(function: object::Function, args: Vec<Object>) -> Result<Object> {
    // Bind function arguments in an enclosed environment.
    let env = extend_function_env(&function, args)?;
    let evaluated = eval_block_statement(function.body, &env)?;

    // If the function had an early return, unwrap one layer so the return
    // halts at this call and not in the caller.
    if let Object::ReturnValue(ret) = evaluated {
        Ok(*ret)
    } else {
        Ok(evaluated)
    }
}

// Extends a function's captured environment with a new frame binding its
// arguments positionally.
fn extend_function_env(func: &object::Function, args: Vec<Object>) -> Result<Env> {
    if func.parameters.len() != args.len() {
        return Err(Error::WrongNumberOfArguments {
            got: args.len(),
            want: func.parameters.len(),
        });
    }

    let env = Environment::new_enclosed(Rc::clone(&func.env)).into_env();

    for (param, arg) in func.parameters.iter().zip(args) {
        env.borrow_mut().set(param.clone(), arg);
    }

    Ok(env)
}

/// Evaluates an index expression on an array or hash.
fn eval_index_expression(expr: ast::IndexExpression, env: &Env) -> Result<Object> {
    let left = eval(ast::Node::Expression(*expr.left), env)?;
    let index = eval(ast::Node::Expression(*expr.index), env)?;

    match (left, index) {
        // Array with numeric index: out of bounds produces null, and
        // negative indices are always out of bounds.
        (Object::Array(a), Object::Integer(i)) => {
            if i >= 0 && (i as usize) < a.elements.len() {
                Ok(a.elements[i as usize].clone())
            } else {
                Ok(Object::Null)
            }
        }

        // Hash with some hashable index: a missing key produces null.
        (Object::Hash(h), key) => match object::Hashable::from_object(&key) {
            Some(key) => Ok(h.pairs.get(&key).cloned().unwrap_or(Object::Null)),
            None => Err(Error::UnusableHashKey(key.type_name())),
        },

        (left, _) => Err(Error::IndexNotSupported(left.type_name())),
    }
}

/// Determines if an object is truthy in Monkey. Only false and null are
/// falsy; zero and empty values are truthy.
fn is_truthy(obj: &Object) -> bool {
    match obj {
        Object::Boolean(false) | Object::Null => false,
        _ => true,
    }
}

/// A Result type specialized for use with an `Error`.
pub type Result<T> = result::Result<T, Error>;

/// Specifies the different classes of errors which may occur during
/// evaluation.
#[derive(Debug, PartialEq)]
pub enum Error {
    TypeMismatch {
        left: &'static str,
        operator: Token,
        right: &'static str,
    },
    UnknownPrefixOperator {
        operator: Token,
        right: &'static str,
    },
    UnknownInfixOperator {
        left: &'static str,
        operator: Token,
        right: &'static str,
    },
    IdentifierNotFound(String),
    NotAFunction(&'static str),
    UnusableHashKey(&'static str),
    IndexNotSupported(&'static str),
    DivisionByZero,
    WrongNumberOfArguments {
        got: usize,
        want: usize,
    },
    Builtin(object::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TypeMismatch {
                left,
                operator,
                right,
            } => write!(f, "type mismatch: {} {} {}", left, operator, right),
            Error::UnknownPrefixOperator { operator, right } => {
                write!(f, "unknown operator: {}{}", operator, right)
            }
            Error::UnknownInfixOperator {
                left,
                operator,
                right,
            } => write!(f, "unknown operator: {} {} {}", left, operator, right),
            Error::IdentifierNotFound(name) => write!(f, "identifier not found: {}", name),
            Error::NotAFunction(type_name) => write!(f, "not a function: {}", type_name),
            Error::UnusableHashKey(type_name) => {
                write!(f, "unusable as hash key: {}", type_name)
            }
            Error::IndexNotSupported(type_name) => {
                write!(f, "index operator not supported: {}", type_name)
            }
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::WrongNumberOfArguments { got, want } => {
                write!(f, "wrong number of arguments. got={}, want={}", got, want)
            }
            Error::Builtin(err) => err.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Builtin(err) => Some(err),
            _ => None,
        }
    }
}
