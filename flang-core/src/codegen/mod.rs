pub mod codegen;
pub mod error;

pub mod prelude {
    pub use super::{
        codegen::*,
        error::*
    };
}

#[cfg(test)]
mod tests;
