mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{path::PathBuf, time::Instant};

use clap::Parser;
use cli::{print_compiled, print_compiling, print_error, print_running, print_written};
use flang_core::{compile_file, evaluate_file, utils::prelude::Error};

#[derive(Parser)]
#[command(version, about = "Interpreter and JavaScript compiler for flang")]
enum Command {
    /// Evaluates a source file and prints the value of its last expression
    Run {
        /// Path of source file
        path: PathBuf,
    },
    /// Compiles a source file to JavaScript
    Compile {
        /// Path of source file
        path: PathBuf,
        /// Path of JavaScript file [default: source path with a `.js` extension]
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print JavaScript to stdout instead of writing a file
        #[arg(long, default_value_t = false)]
        stdout: bool,
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() {
    let outcome = match Command::parse() {
        Command::Run { path } => run(path),
        Command::Compile { path, output, stdout } => compile(path, output, stdout),
        Command::Repl => repl::start().map_err(io_error),
        Command::Rlpl => rlpl::start().map_err(io_error),
        Command::Rppl => rppl::start().map_err(io_error),
    };

    if let Err(err) = outcome {
        print_error(&err);
        std::process::exit(1);
    }
}

fn run(path: PathBuf) -> Result<(), Error> {
    print_running(&path.to_string_lossy());

    let value = evaluate_file(path)?;
    println!("{value}");

    Ok(())
}

fn compile(path: PathBuf, output: Option<PathBuf>, stdout: bool) -> Result<(), Error> {
    print_compiling(&path.to_string_lossy());
    let start = Instant::now();

    let code = compile_file(path.clone())?;

    if stdout {
        println!("{code}");
    } else {
        let output = output.unwrap_or_else(|| path.with_extension("js"));

        std::fs::write(&output, format!("{code};\n")).map_err(io_error)?;
        print_written(&output.to_string_lossy());
    }

    print_compiled(Instant::now() - start);

    Ok(())
}

fn io_error(err: std::io::Error) -> Error {
    Error::StdIo { err: err.kind() }
}
