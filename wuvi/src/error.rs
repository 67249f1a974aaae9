use std::{fmt::Display, io, ops::Range};

use crate::variables::Tag;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,

    /// Source line, starting at 1. Zero when the error isn't tied to a
    /// line.
    pub line: usize,

    /// Byte range of the offending token within its line.
    pub span: Range<usize>,
}

#[derive(Debug)]
pub enum ErrorKind {
    /// A literal couldn't be turned into a value of the declared type.
    ParseError { token: String, expected: Tag },

    /// Reading input or writing output failed. Running out of input
    /// during a read shows up as [`io::ErrorKind::UnexpectedEof`].
    IoError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, line: usize, span: Range<usize>) -> Self {
        Self { kind, line, span }
    }

    /// Create an error for input that ended while a statement was
    /// waiting for a line.
    pub fn unexpected_eof(line: usize) -> Self {
        Self::new(
            ErrorKind::IoError(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before a line could be read",
            )),
            line,
            0..0,
        )
    }

    /// Attach a source line to an error that doesn't have one yet.
    pub fn at_line(mut self, line: usize) -> Self {
        if self.line == 0 {
            self.line = line;
        }
        self
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error on line {}: {}", self.line, self.kind)
    }
}
impl std::error::Error for Error {}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ParseError { token, expected } => {
                write!(f, "cannot read \"{}\" as {}", token, expected)
            }
            ErrorKind::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self {
            kind: ErrorKind::IoError(e),
            line: 0,
            span: 0..0,
        }
    }
}
