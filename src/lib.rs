//! Lox is a small dynamically typed scripting language with first-class
//! functions, lexical closures and single-inheritance classes. This crate is
//! a tree-walk interpreter for it: source text goes in, side effects (what
//! the program prints) come out.
//!
//! ## Scanning
//! The first step is scanning. The [`scanner`](scanner) turns the source text
//! into a flat list of [`tokens`](token::Token). Each token records its kind,
//! the exact substring it was scanned from, an optional literal value and its
//! position in the source. Lexical problems like an unterminated string or a
//! stray character are reported as [`ScanError`](error::ScanError)s, but the
//! scanner keeps going so a single run can surface every one of them.
//!
//! ## Parsing
//! The [`parser`](parser) is a hand-written recursive descent parser with one
//! token of lookahead. It builds a tree of [`expressions`](expr::Expr), which
//! produce values, and [`statements`](stmt::Stmt), which have effects. On a
//! syntax error it reports a [`ParseError`](error::ParseError), discards
//! tokens up to the next statement boundary and keeps parsing, so unrelated
//! errors later in the file still get reported.
//!
//! ## Resolving
//! Before anything runs, the [`resolver`](resolver) walks the fresh tree once
//! and computes, for every variable use that refers to a local, how many
//! scopes sit between the use and its binding. The interpreter later walks
//! exactly that many environment frames outward, which is what makes closures
//! capture the binding that was visible at declaration time rather than
//! whatever happens to shadow it later. The same pass catches the errors that
//! are syntactically fine but semantically not, such as a variable that reads
//! itself in its own initializer or a `return` at the top level. Any
//! [`ResolveError`](error::ResolveError) suppresses execution.
//!
//! ## Interpreting
//! The [`interpreter`](interpreter) walks the tree and evaluates it against a
//! chain of [`environments`](environment::Environment). Runtime values are
//! [`objects`](object::Object): literals, functions, classes and instances.
//! A [`RuntimeError`](error::RuntimeError), such as adding a string to a
//! number or calling something that is not callable, unwinds the whole walk
//! and stops the program.

use std::{fs, process};

pub mod error;
pub mod token;
pub mod literal;
pub mod scanner;
pub mod expr;
pub mod stmt;
pub mod ast;
pub mod parser;
pub mod resolver;
pub mod environment;
pub mod object;
pub mod function;
pub mod class;
pub mod interpreter;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use parser::Parser;
use scanner::Scanner;
use resolver::Resolver;

/// The driver: owns the interpreter and feeds it programs from a file or
/// from an interactive prompt.
pub struct Lox {
    interpreter: interpreter::Interpreter,
}

impl Lox {
    pub fn new() -> Self {
        Lox {
            interpreter: interpreter::Interpreter::new(),
        }
    }

    /// Runs a script from a file and exits the process: 65 on a compile-time
    /// error, 70 on a runtime error, 74 if the file cannot be read.
    pub fn run_file(&mut self, path: &str) {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) => {
                eprintln!("Could not read {path}: {error}");
                process::exit(74);
            },
        };

        self.run(&contents, 1);

        if error::did_runtime_error() {
            process::exit(70);
        }
        if error::did_error() {
            process::exit(65);
        }
    }

    /// Runs an interactive prompt until end of input. Errors are reported and
    /// forgotten so the session keeps going. History is kept across sessions
    /// in `~/.lox_history`.
    pub fn run_prompt(&mut self) {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(error) => {
                eprintln!("Could not start the prompt: {error}");
                return;
            },
        };

        let history = home::home_dir().map(|dir| dir.join(".lox_history"));
        if let Some(history) = &history {
            let _ = editor.load_history(history);
        }

        // Submissions keep counting lines up from where the previous one
        // stopped, so every token location stays unique within the session.
        let mut line = 1;

        loop {
            match editor.readline("> ") {
                Ok(input) => {
                    let _ = editor.add_history_entry(input.as_str());

                    self.run(&input, line);
                    line += input.matches('\n').count() + 1;

                    error::reset_error();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("Could not read input: {error}");
                    break;
                },
            }
        }

        if let Some(history) = &history {
            let _ = editor.save_history(history);
        }
    }

    /// Runs one program through the pipeline. Each stage only runs if the
    /// previous ones reported no errors.
    fn run(&mut self, source: &str, start_line: usize) {
        let mut scanner = Scanner::with_start_line(source, start_line);
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

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}
