use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    codegen::prelude::CompileError,
    eval::prelude::RuntimeError,
    parser::prelude::ParseError,
};
use super::diagnostic::{Diagnostic, Label, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("evaluation failed")]
    Runtime {
        #[from]
        error: RuntimeError
    },
    #[error("compilation failed")]
    Compile {
        #[from]
        error: CompileError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();
                let text = extra.join("\n");

                vec![Diagnostic {
                    title: "Syntax error".into(),
                    text,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.span,
                        },
                    }),
                }]
            },
            Error::Runtime { error } => {
                vec![Diagnostic {
                    title: error.title().into(),
                    text: error.message.clone(),
                    location: None,
                }]
            },
            Error::Compile { error } => {
                vec![Diagnostic {
                    title: error.title().into(),
                    text: error.message.clone(),
                    location: None,
                }]
            },
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    location: None,
                }]
            }
        }
    }
}
