mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::path::PathBuf;

use clap::Parser;
use expr_core::{
    environment::prelude::Environment,
    eval::prelude::eval,
    parser::prelude::{parse_source_at, ParseErrorType},
    utils::prelude::Error,
};

#[derive(Parser)]
enum Command {
    /// Evaluates a file of expressions, one per line
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print the ast of each line instead of its value
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl,
}

fn main() {
    match Command::parse() {
        Command::Run { path, print_ast } => run(path, print_ast),
        Command::Repl => {
            let _ = repl::start();
        },
        Command::Rlpl => {
            let _ = rlpl::start();
        },
        Command::Rppl => {
            let _ = rppl::start();
        }
    }
}

fn run(path: PathBuf, print_ast: bool) {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    let src = match std::fs::read_to_string(&path) {
        Ok(src) => src,
        Err(err) => {
            Error::StdIo { err: err.kind() }.pretty(&mut buf);
            buf_writer
                .print(&buf)
                .expect("Writing error to stderr");

            return;
        }
    };

    cli::print_running(path.to_str().unwrap());
    let start = std::time::Instant::now();

    let mut env = Environment::new();
    // spans stay relative to the whole file so diagnostics point into it
    let mut offset = 0_u32;

    for line in src.lines() {
        let line_offset = offset;
        offset += line.len() as u32 + 1;

        let expression = match parse_source_at(line, line_offset) {
            Ok(expression) => expression,
            // blank and comment-only lines parse to nothing
            Err(error) if error.error == ParseErrorType::EmptyInput => continue,
            Err(error) => {
                Error::Parse {
                    path: path.clone(),
                    src: src.clone(),
                    error
                }.pretty(&mut buf);
                buf_writer
                    .print(&buf)
                    .expect("Writing error to stderr");

                return;
            }
        };

        if print_ast {
            println!("{expression:#?}");
            continue;
        }

        match eval(&expression, &mut env) {
            Ok(value) => println!("{value}"),
            Err(error) => {
                Error::Runtime {
                    path: path.clone(),
                    src: src.clone(),
                    error
                }.pretty(&mut buf);
                buf_writer
                    .print(&buf)
                    .expect("Writing error to stderr");

                return;
            }
        }
    }

    cli::print_evaluated(std::time::Instant::now() - start);
}
