//! A Rust implementation of the Monkey programming language: a lexer, a
//! Pratt parser, and a tree-walking evaluator with first-class closures.

pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod token;
