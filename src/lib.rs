#![allow(clippy::needless_return)]

//! Shale is a small dynamically typed scripting language with lexical
//! scoping, first-class functions and single-dispatch classes. It runs as a
//! tree-walk interpreter with a hand-written recursive descent parser.
//!
//! ## Scanning
//! The first step is scanning: turning the source string into a list of
//! tokens. The scanner is implemented in the [`scanner`](scanner) module as
//! a sliding window over the characters in the source. It reports problems
//! like an unterminated string or an unexpected character as a
//! [`ScanError`](error::ScanError) and stops at the first one it finds.
//!
//! ## Parsing
//! The second step is parsing: turning the token list into an abstract
//! syntax tree. The parser is implemented in the [`parser`](parser) module
//! as a recursive descent parser producing [`expressions`](expr::Expr),
//! which evaluate to an [`Object`](object::Object), and
//! [`statements`](stmt::Stmt), which execute for their effect. Syntax
//! errors are reported as a [`ParseError`](error::ParseError); after a
//! fatal one the parser synchronizes to the next statement boundary and
//! keeps going, so a single run can surface several errors at once.
//!
//! ## Resolving
//! The third step is resolving: a static pass over the AST that binds every
//! variable use to the scope that declares it. Each resolved use is keyed by
//! its node id and mapped to the distance of the enclosing environment
//! frame. Semantically invalid code that the parser cannot reject, like
//! `return` at the top level or a variable that shadows itself in the same
//! scope, is reported as a [`ResolveError`](error::ResolveError).
//!
//! ## Interpreting
//! The final step is interpreting. The [`interpreter`](interpreter) module
//! walks the tree and evaluates it against a chain of
//! [`environments`](environment::Environment), one frame per block or call,
//! rooted at the global frame. Type mismatches and other problems that can
//! only be caught while the program runs are reported as a
//! [`RuntimeError`](error::RuntimeError) and abort the run.

use std::io::Write;
use std::{fs, process};

use rustyline::error::ReadlineError;

pub mod error;
pub mod token;
pub mod literal;
pub mod scanner;
pub mod expr;
pub mod stmt;
pub mod parser;
pub mod resolver;
pub mod environment;
pub mod object;
pub mod function;
pub mod class;
pub mod interpreter;

use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

#[allow(non_camel_case_types)]
pub struct shale<'a> {
    interpreter: interpreter::Interpreter<'a>,
}

impl<'a> shale<'a> {
    /// Creates a new interpreter session writing program output to `out`.
    pub fn new(out: &'a mut dyn Write) -> Self {
        shale {
            interpreter: interpreter::Interpreter::new(out),
        }
    }

    /// Runs a script file. Exits with status 1 if anything went wrong.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("should have been able to read the script");

        self.run(&contents);

        if error::did_error() {
            process::exit(1);
        }
    }

    /// Runs the interactive prompt until end of input. The error flags are
    /// reset between lines so one bad input does not poison the next.
    pub fn run_prompt(&mut self) {
        let mut editor = rustyline::DefaultEditor::new()
            .expect("terminal to support line editing");

        let history = home::home_dir().map(|dir| dir.join(".shale_history"));
        if let Some(history) = &history {
            let _ = editor.load_history(history);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(&line);
                    self.run(&line);
                    error::reset_error();
                },
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("{error}");
                    break;
                },
            }
        }

        if let Some(history) = &history {
            let _ = editor.save_history(history);
        }
    }

    /// Runs a chunk of source through the whole pipeline. Every phase is
    /// skipped once an earlier one has reported an error.
    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if error::did_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if error::did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}
