#![forbid(unsafe_code, clippy::unwrap_used)]

pub mod ast;
pub mod consts;
pub mod error;
pub mod interpret;
pub mod lexer;
pub mod parser;
pub mod variables;
