//! An interactive read-eval-print loop for the Monkey programming language.

use crate::ast;
use crate::evaluator;
use crate::lexer::Lexer;
use crate::object::{Env, Environment};
use crate::parser::Parser;

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReadlineResult};

const PROMPT: &str = ">> ";

/// An interactive session which evaluates each input line against a
/// persistent top-level environment.
pub struct Repl {
    editor: DefaultEditor,
}

impl Repl {
    /// Creates a new `Repl` with line editing and in-memory history.
    pub fn new() -> ReadlineResult<Self> {
        Ok(Repl {
            editor: DefaultEditor::new()?,
        })
    }

    /// Runs the read-eval-print loop until `exit` or end of input.
    pub fn run(&mut self) -> ReadlineResult<()> {
        let env = Environment::new().into_env();

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if line == "exit" {
                        break;
                    }

                    let _ = self.editor.add_history_entry(line);
                    eval_line(line, &env);
                }
                // Ctrl-C cancels the current line but not the session.
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

// Runs one line through the interpreter pipeline, printing parse errors or
// the inspected result.
fn eval_line(line: &str, env: &Env) {
    let mut parser = Parser::new(Lexer::new(line));

    let program = match parser.parse() {
        Ok(program) => program,
        Err(errors) => {
            for err in errors.errors() {
                println!("parser error: {}", err);
            }
            return;
        }
    };

    match evaluator::eval(ast::Node::Program(program), env) {
        Ok(obj) => println!("{}", obj),
        Err(err) => println!("ERROR: {}", err),
    }
}
