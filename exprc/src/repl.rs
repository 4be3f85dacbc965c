use std::io::Write;
use std::path::PathBuf;

use expr_core::{
	environment::prelude::Environment,
	eval::prelude::eval,
	parser::prelude::parse_source,
	utils::prelude::Error,
};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	ctrlc::set_handler(|| std::process::exit(0))
		.expect("Setting Ctrl-C handler");

	let stdin = std::io::stdin();
	let mut env = Environment::new();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		// Ctrl-D
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let expression = match parse_source(&input) {
					Ok(expression) => expression,
					Err(error) => {
						print_error(Error::Parse {
							path: PathBuf::from("<repl>"),
							src: input.clone(),
							error
						});
						continue;
					}
				};

				match eval(&expression, &mut env) {
					Ok(value) => println!("{value}"),
					Err(error) => print_error(Error::Runtime {
						path: PathBuf::from("<repl>"),
						src: input.clone(),
						error
					})
				}
			}
		}
	}
}

fn print_error(error: Error) {
	let buf_writer = crate::cli::stderr_buffer_writer();
	let mut buf = buf_writer.buffer();

	error.pretty(&mut buf);
	buf_writer
		.print(&buf)
		.expect("Writing error to stderr");
}
