use std::io::Write;

use flang_core::lexer::prelude::Lexer;

const PROMPT: &str = "lex> ";

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
				let lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

				for res in lexer {
					match res {
						Ok((start, token, end)) => println!("{start}..{end}\t{token:?}"),
						Err(err) => {
							let (_, extra) = err.details();
							println!("{err}");
							if !extra.is_empty() {
								println!("\t{}", extra.join("\n\t"));
							}
							break;
						}
					}
				}
			}
		}
	}
}
