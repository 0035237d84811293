use std::io::Write;

use flang_core::parser::prelude::parse;

const PROMPT: &str = "parse> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

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
				match parse(&input) {
					Ok(program) => {
						println!("{}", program);
					},
					Err(err) => {
						let (message, messages) = err.details();

						println!("Parse error: {}.\n\t{}", message, messages.join(";\n\t"))
					}
				}
			}
		}
	}
}
