extern crate getopts;
extern crate monkey_lang;

use getopts::Options;
use monkey_lang::ast;
use monkey_lang::evaluator;
use monkey_lang::lexer::Lexer;
use monkey_lang::object::Environment;
use monkey_lang::parser::{self, Parser};
use monkey_lang::repl::Repl;
use monkey_lang::token::Token;

use std::env;
use std::error;
use std::process;

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optflag("h", "help", "print this help menu");
    opts.optflag("l", "lex", "only perform the lexing process");
    opts.optflag("p", "parse", "only perform the lexing and parsing processes");

    let matches = opts.parse(&args[1..])?;

    if matches.opt_present("h") {
        let brief = format!("Usage: {} 'let five = 5;'", program);
        print!("{}", opts.usage(&brief));
        return Ok(());
    }

    // With no input program, drop into the interactive REPL.
    if matches.free.is_empty() {
        let mut repl = Repl::new()?;
        repl.run()?;
        return Ok(());
    }

    // Pass all free arguments through the interpreter pipeline.
    let source = matches.free.join(" ");

    if matches.opt_present("l") {
        lex(&source);
        return Ok(());
    }

    let prog = match parse(&source) {
        Ok(prog) => prog,
        Err(errors) => {
            for err in errors.errors() {
                eprintln!("parser error: {}", err);
            }
            process::exit(1);
        }
    };

    if matches.opt_present("p") {
        for s in &prog.statements {
            println!("{}", s);
        }
        return Ok(());
    }

    let env = Environment::new().into_env();
    match evaluator::eval(ast::Node::Program(prog), &env) {
        Ok(obj) => println!("{}", obj),
        Err(err) => {
            eprintln!("ERROR: {}", err);
            process::exit(1);
        }
    }

    Ok(())
}

fn lex(source: &str) {
    let mut l = Lexer::new(source);

    loop {
        let t = l.next_token();
        if t == Token::Eof {
            break;
        }

        println!("  - {:?}", t);
    }
}

fn parse(source: &str) -> parser::Result<ast::Program> {
    let mut p = Parser::new(Lexer::new(source));
    p.parse()
}
