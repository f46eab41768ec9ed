//! A parser for the Monkey programming language.

use crate::ast;
use crate::lexer::Lexer;
use crate::token::{Location, Token};

use std::error;
use std::fmt;
use std::mem;
use std::result;

/// Parses `Token`s and produces an `ast::Program` for the Monkey programming
/// language.
pub struct Parser<'a> {
    lexer: Lexer<'a>,

    // A pair of lookahead tokens, advanced in lockstep along with the
    // source position of each.
    current: Token,
    peek: Token,
    current_location: Location,
    peek_location: Location,

    errors: Vec<Error>,
}

impl<'a> Parser<'a> {
    /// Creates a new `Parser` by accepting a `Lexer`.
    pub fn new(lexer: Lexer<'a>) -> Self {
        let mut p = Parser {
            lexer,

            current: Token::Eof,
            peek: Token::Eof,
            current_location: Location::default(),
            peek_location: Location::default(),

            errors: vec![],
        };

        // Advance twice to prime current and peek.
        p.next_token();
        p.next_token();

        p
    }

    /// Parses the input `Token` stream and creates an `ast::Program`.
    ///
    /// Errors do not halt parsing: the parser accumulates every error it
    /// encounters and keeps scanning statements, so a single pass reports
    /// as many problems as possible. A non-empty accumulated list makes the
    /// resulting tree untrustworthy, so it is discarded and the list is
    /// returned instead.
    pub fn parse(&mut self) -> Result<ast::Program> {
        let mut prog = ast::Program::new();

        while !self.current_is(Token::Eof) {
            match self.parse_statement() {
                Ok(stmt) => prog.statements.push(stmt),
                Err(err) => self.errors.push(err),
            }

            self.next_token();
        }

        if self.errors.is_empty() {
            Ok(prog)
        } else {
            Err(Errors(mem::replace(&mut self.errors, vec![])))
        }
    }

    /// Looks at the current `Token` and determines if it is the same type as
    /// `tok`.
    fn current_is(&self, tok: Token) -> bool {
        self.current == tok
    }

    /// Peeks at the next `Token` and determines if it is the same type as
    /// `tok`.
    fn peek_is(&self, tok: Token) -> bool {
        self.peek == tok
    }

    /// Peeks at the next `Token` and expects it to be the same type as
    /// `tok`, advancing onto it if so.
    fn expect_peek(&mut self, tok: Token) -> ParseResult<()> {
        if self.peek_is(tok.clone()) {
            self.next_token();
            Ok(())
        } else {
            Err(Error::UnexpectedToken {
                want: tok.to_string(),
                got: self.peek.to_string(),
                location: self.peek_location,
            })
        }
    }

    /// Peeks and extracts the name from a `Token::Identifier`, advancing
    /// onto it, or returns an error if the `Token` is of a different type.
    fn peek_extract_identifier(&mut self) -> ParseResult<String> {
        if let Token::Identifier(name) = &self.peek {
            let name = name.clone();
            self.next_token();
            Ok(name)
        } else {
            Err(Error::UnexpectedToken {
                want: "identifier".to_string(),
                got: self.peek.to_string(),
                location: self.peek_location,
            })
        }
    }

    /// Extracts the name from the current `Token::Identifier`, or returns an
    /// error if the `Token` is of a different type.
    fn current_extract_identifier(&self) -> ParseResult<String> {
        if let Token::Identifier(name) = &self.current {
            Ok(name.clone())
        } else {
            Err(Error::UnexpectedToken {
                want: "identifier".to_string(),
                got: self.current.to_string(),
                location: self.current_location,
            })
        }
    }

    /// Advances the parser once in its `Token` stream.
    fn next_token(&mut self) {
        // current takes the value of peek, and peek is overwritten
        // immediately after by the next token.
        mem::swap(&mut self.current, &mut self.peek);
        self.current_location = self.peek_location;

        self.peek = self.lexer.next_token();
        self.peek_location = self.lexer.location();
    }

    /// Parses a single statement, dispatched on the current token.
    fn parse_statement(&mut self) -> ParseResult<ast::Statement> {
        match self.current {
            Token::Let => self.parse_let_statement(),
            Token::Return => self.parse_return_statement(),

            _ => self.parse_expression_statement(),
        }
    }

    /// Parses a let statement: `let IDENT = <expression>` with an optional
    /// trailing semicolon.
    fn parse_let_statement(&mut self) -> ParseResult<ast::Statement> {
        let name = self.peek_extract_identifier()?;

        self.expect_peek(Token::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(Token::Semicolon) {
            self.next_token();
        }

        Ok(ast::Statement::Let(ast::LetStatement { name, value }))
    }

    /// Parses a return statement with an optional value and an optional
    /// trailing semicolon.
    fn parse_return_statement(&mut self) -> ParseResult<ast::Statement> {
        // A bare `return` carries no value.
        let value = match self.peek {
            Token::Semicolon | Token::RightBrace | Token::Eof => None,
            _ => {
                self.next_token();
                Some(self.parse_expression(Precedence::Lowest)?)
            }
        };

        if self.peek_is(Token::Semicolon) {
            self.next_token();
        }

        Ok(ast::Statement::Return(ast::ReturnStatement { value }))
    }

    /// Parses an expression statement terminated by an optional semicolon.
    fn parse_expression_statement(&mut self) -> ParseResult<ast::Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(Token::Semicolon) {
            self.next_token();
        }

        Ok(ast::Statement::Expression(expr))
    }

    /// Parses an expression by precedence climbing: a prefix parselet
    /// produces the left-hand side, and infix parselets fold it into larger
    /// expressions while the next operator binds more tightly.
    fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<ast::Expression> {
        let mut left = self.parse_prefix()?;

        // Every token with a precedence above Lowest has an infix parselet,
        // so the climb stops purely on precedence.
        while !self.peek_is(Token::Semicolon) && precedence < token_precedence(&self.peek) {
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Ok(left)
    }

    /// Dispatches on the current token to its prefix parselet.
    fn parse_prefix(&mut self) -> ParseResult<ast::Expression> {
        match self.current.clone() {
            Token::Identifier(name) => Ok(ast::Expression::Identifier(name)),
            Token::Integer(literal) => self.parse_integer_literal(literal),
            Token::String(s) => Ok(ast::Expression::String(s)),
            Token::True => Ok(ast::Expression::Boolean(true)),
            Token::False => Ok(ast::Expression::Boolean(false)),
            Token::Bang | Token::Minus => self.parse_prefix_expression(),
            Token::LeftParen => self.parse_grouped_expression(),
            Token::LeftBracket => self.parse_array_literal(),
            // A brace in expression position always opens a hash literal;
            // blocks only ever follow an if or fn header.
            Token::LeftBrace => self.parse_hash_literal(),
            Token::If => self.parse_if_expression(),
            Token::Function => self.parse_function_literal(),

            tok => Err(Error::NoPrefixParser {
                token: tok.to_string(),
                location: self.current_location,
            }),
        }
    }

    /// Parses the raw digits of an integer literal into a signed 64-bit
    /// value.
    fn parse_integer_literal(&mut self, literal: String) -> ParseResult<ast::Expression> {
        match literal.parse::<i64>() {
            Ok(value) => Ok(ast::Expression::Integer(value)),
            Err(_) => Err(Error::IllegalInteger {
                literal,
                location: self.current_location,
            }),
        }
    }

    /// Parses a prefix operator expression such as `!ok` or `-5`.
    fn parse_prefix_expression(&mut self) -> ParseResult<ast::Expression> {
        let operator = self.current.clone();

        // Advance past the operator onto its operand.
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(ast::Expression::Prefix(ast::PrefixExpression {
            operator,
            right: Box::new(right),
        }))
    }

    /// Parses a parenthesized expression.
    fn parse_grouped_expression(&mut self) -> ParseResult<ast::Expression> {
        self.next_token();

        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(Token::RightParen)?;

        Ok(expr)
    }

    /// Parses an array literal: a bracketed, comma-separated expression
    /// list.
    fn parse_array_literal(&mut self) -> ParseResult<ast::Expression> {
        let elements = self.parse_expression_list(Token::RightBracket)?;

        Ok(ast::Expression::Array(ast::ArrayLiteral { elements }))
    }

    /// Parses a hash literal: a braced, comma-separated list of
    /// `key: value` expression pairs, kept in source order.
    fn parse_hash_literal(&mut self) -> ParseResult<ast::Expression> {
        let mut pairs = vec![];

        while !self.peek_is(Token::RightBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(Token::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(Token::RightBrace) {
                self.expect_peek(Token::Comma)?;
            }
        }

        self.expect_peek(Token::RightBrace)?;

        Ok(ast::Expression::Hash(ast::HashLiteral { pairs }))
    }

    /// Parses an if expression with an optional else arm.
    fn parse_if_expression(&mut self) -> ParseResult<ast::Expression> {
        self.expect_peek(Token::LeftParen)?;
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(Token::RightParen)?;
        self.expect_peek(Token::LeftBrace)?;

        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_is(Token::Else) {
            self.next_token();
            self.expect_peek(Token::LeftBrace)?;

            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(ast::Expression::If(ast::IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// Parses a function literal: `fn` followed by a parameter list and a
    /// body block.
    fn parse_function_literal(&mut self) -> ParseResult<ast::Expression> {
        self.expect_peek(Token::LeftParen)?;

        let parameters = self.parse_function_parameters()?;

        self.expect_peek(Token::LeftBrace)?;

        let body = self.parse_block_statement()?;

        Ok(ast::Expression::Function(ast::FunctionLiteral {
            parameters,
            body,
        }))
    }

    /// Parses a comma-separated list of parameter names terminated by a
    /// closing parenthesis.
    fn parse_function_parameters(&mut self) -> ParseResult<Vec<String>> {
        let mut parameters = vec![];

        if self.peek_is(Token::RightParen) {
            self.next_token();
            return Ok(parameters);
        }

        self.next_token();
        parameters.push(self.current_extract_identifier()?);

        while self.peek_is(Token::Comma) {
            self.next_token();
            self.next_token();
            parameters.push(self.current_extract_identifier()?);
        }

        self.expect_peek(Token::RightParen)?;

        Ok(parameters)
    }

    /// Parses a block of statements, stopping at the closing brace or end
    /// of input.
    fn parse_block_statement(&mut self) -> ParseResult<ast::BlockStatement> {
        let mut statements = vec![];

        self.next_token();

        while !self.current_is(Token::RightBrace) && !self.current_is(Token::Eof) {
            statements.push(self.parse_statement()?);
            self.next_token();
        }

        Ok(ast::BlockStatement { statements })
    }

    /// Dispatches on the current token to its infix parselet, folding
    /// `left` into a larger expression.
    fn parse_infix(&mut self, left: ast::Expression) -> ParseResult<ast::Expression> {
        match self.current {
            Token::LeftParen => self.parse_call_expression(left),
            Token::LeftBracket => self.parse_index_expression(left),

            _ => self.parse_infix_expression(left),
        }
    }

    /// Parses a binary operator expression such as `a + b`. Recursing at
    /// the operator's own precedence makes all operators left-associative.
    fn parse_infix_expression(&mut self, left: ast::Expression) -> ParseResult<ast::Expression> {
        let operator = self.current.clone();
        let precedence = token_precedence(&self.current);

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(ast::Expression::Infix(ast::InfixExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    /// Parses a call expression: the parenthesized argument list following
    /// a callable expression.
    fn parse_call_expression(&mut self, function: ast::Expression) -> ParseResult<ast::Expression> {
        let arguments = self.parse_expression_list(Token::RightParen)?;

        Ok(ast::Expression::Call(ast::CallExpression {
            function: Box::new(function),
            arguments,
        }))
    }

    /// Parses an index expression: a bracketed subscript following an
    /// expression.
    fn parse_index_expression(&mut self, left: ast::Expression) -> ParseResult<ast::Expression> {
        self.next_token();

        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(Token::RightBracket)?;

        Ok(ast::Expression::Index(ast::IndexExpression {
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    /// Parses a comma-separated expression list terminated by `end`.
    fn parse_expression_list(&mut self, end: Token) -> ParseResult<Vec<ast::Expression>> {
        let mut list = vec![];

        if self.peek_is(end.clone()) {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(Token::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;

        Ok(list)
    }
}

/// The binding strength of each operator class, in ascending order.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

// Produces the precedence of a token when it appears in infix position.
fn token_precedence(tok: &Token) -> Precedence {
    match tok {
        Token::Equal | Token::NotEqual => Precedence::Equals,
        Token::LessThan | Token::GreaterThan => Precedence::LessGreater,
        Token::Plus | Token::Minus => Precedence::Sum,
        Token::Asterisk | Token::Slash => Precedence::Product,
        Token::LeftParen | Token::LeftBracket => Precedence::Call,

        _ => Precedence::Lowest,
    }
}

/// A Result type specialized for use with accumulated parser `Errors`.
pub type Result<T> = result::Result<T, Errors>;

// An internal Result type for individual parse operations. Errors are
// accumulated into an `Errors` list by `parse`.
type ParseResult<T> = result::Result<T, Error>;

/// Every error accumulated over one pass of the parser.
#[derive(Debug, PartialEq)]
pub struct Errors(Vec<Error>);

impl Errors {
    /// Returns each individual parse error, in the order encountered.
    pub fn errors(&self) -> &[Error] {
        &self.0
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();

        write!(f, "{}", messages.join("\n"))
    }
}

impl error::Error for Errors {}

/// Specifies the different classes of errors which may occur during
/// parsing.
#[derive(Debug, PartialEq)]
pub enum Error {
    UnexpectedToken {
        want: String,
        got: String,
        location: Location,
    },
    NoPrefixParser {
        token: String,
        location: Location,
    },
    IllegalInteger {
        literal: String,
        location: Location,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnexpectedToken {
                want,
                got,
                location,
            } => write!(
                f,
                "expected next token to be {}, got: {} ({})",
                want, got, location
            ),
            Error::NoPrefixParser { token, location } => write!(
                f,
                "no prefix parse function for {} found ({})",
                token, location
            ),
            Error::IllegalInteger { literal, location } => write!(
                f,
                "could not parse {} as integer ({})",
                literal, location
            ),
        }
    }
}

impl error::Error for Error {}
