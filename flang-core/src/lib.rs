pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod codegen;
pub mod utils;


use std::{io::Read, path::PathBuf};

use utf8_chars::BufReadCharsExt;

use crate::{
    codegen::prelude::compile,
    environment::prelude::{Scope, Value},
    eval::prelude::evaluate,
    parser::prelude::{parse, parse_from_stream, Expression},
    utils::prelude::Error,
};

/// Extension of source files a module loader should hand to the compiler.
pub const FILE_EXTENSION: &str = "fl";

const INPUT_PATH: &str = "<input>";

/// A parsed source file together with the text it was read from.
#[derive(Debug)]
pub struct Source {
    pub path: PathBuf,
    pub src: String,
    pub program: Expression,
}

pub fn parse_source(src: &str) -> Result<Expression, Error> {
    parse(src).map_err(|error| Error::Parse {
        path: PathBuf::from(INPUT_PATH),
        src: src.to_string(),
        error
    })
}

/// Parses and evaluates `src` in a fresh global scope.
pub fn parse_evaluate(src: &str) -> Result<Value, Error> {
    let program = parse_source(src)?;

    Ok(evaluate(&program, &Scope::global())?)
}

/// Parses `src` and compiles it to JavaScript.
pub fn parse_compile(src: &str) -> Result<String, Error> {
    let program = parse_source(src)?;

    Ok(compile(&program)?)
}

/// Streams a file through the parser, keeping the text for diagnostics.
pub fn parse_file(path: PathBuf) -> Result<Source, Error> {
    let file = match std::fs::File::open(path.clone()) {
        Ok(file) => file,
        Err(err) => {
            let error = Error::StdIo { err: err.kind() };
            return Err(error)
        }
    };

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);
    let mut read_error = None;

    let parsed = {
        let stream = reader.chars()
            .map_while(|c| match c {
                Ok(c) => {
                    src.push(c);
                    Some(c)
                },
                Err(err) => {
                    read_error = Some(err.kind());
                    None
                }
            });

        parse_from_stream(stream)
    };

    if let Some(err) = read_error {
        return Err(Error::StdIo { err });
    }

    match parsed {
        Ok(program) => Ok(Source { path, src, program }),
        Err(error) => {
            // the parser stops at the first error, the report wants the rest
            reader.read_to_string(&mut src)
                .map_err(|err| Error::StdIo { err: err.kind() })?;

            Err(Error::Parse { path, src, error })
        }
    }
}

pub fn evaluate_file(path: PathBuf) -> Result<Value, Error> {
    let source = parse_file(path)?;

    Ok(evaluate(&source.program, &Scope::global())?)
}

pub fn compile_file(path: PathBuf) -> Result<String, Error> {
    let source = parse_file(path)?;

    Ok(compile(&source.program)?)
}
