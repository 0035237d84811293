use std::{io::Write, path::PathBuf};

use flang_core::{
	environment::prelude::{Scope, ScopeRef, Value},
	eval::prelude::evaluate_body,
	parser::prelude::{parse, Expression},
	utils::prelude::Error,
};

use crate::cli::print_error;

const PROMPT: &str = "flang> ";
const REPL_PATH: &str = "<repl>";

pub fn start() -> std::io::Result<()> {
	ctrlc::set_handler(|| {
		println!();
		std::process::exit(0);
	})
	.map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

	let stdin = std::io::stdin();
	let scope = Scope::global();

	println!("Type .scope to list bindings, .exit to leave.");

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			println!();
			return Ok(());
		}

		let line = input.trim_end_matches(['\n', '\r']);

		match line {
			"" => {},
			".exit" => return Ok(()),
			".scope" => {
				for name in scope.borrow().names() {
					println!("{name}");
				}
			},
			_ => match eval_line(line, &scope) {
				Ok(value) => println!("{value}"),
				Err(err) => print_error(&err),
			}
		}
	}
}

/// Runs one line against the session scope, so its `def`s outlive it.
fn eval_line(line: &str, scope: &ScopeRef) -> Result<Value, Error> {
	let program = parse(line).map_err(|error| Error::Parse {
		path: PathBuf::from(REPL_PATH),
		src: line.to_string(),
		error
	})?;

	match program {
		Expression::Form(form) => Ok(evaluate_body(&form.args, scope)?),
		expression => Ok(evaluate_body(std::slice::from_ref(&expression), scope)?),
	}
}
