//! Wuvi statements
//!
//! Every non-empty source line classifies as at most one statement. A
//! function definition also owns the raw lines of its body, which are
//! never classified themselves.

use std::{fmt::Display, hash::Hash};

use crate::{consts, variables::Tag};

type Span = std::ops::Range<usize>;

/// A single token taken verbatim from the source, with its position
/// in the line.
#[derive(Debug, Clone)]
pub struct Word {
    pub text: String,
    pub span: Span,
}

impl Word {
    pub fn new(text: String, span: Span) -> Self {
        Self { text, span }
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Hash for Word {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state)
    }
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,

    /// Source line, starting at 1.
    pub line: usize,
}

impl PartialEq for Stmt {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum StmtKind {
    /// `init <name> ...` followed by body lines.
    Define {
        ident: Word,
        body: Vec<String>,
        terminated: bool,
    },

    /// `<name> = <marker> [<literal>]`
    Assign {
        ident: Word,
        tag: Tag,
        literal: Option<Word>,
    },

    /// `<opcode> <argument>`
    Call { builtin: Builtin, arg: Word },
}

impl Stmt {
    pub fn new(kind: StmtKind, line: usize) -> Self {
        Self { kind, line }
    }
}

/// An action selected by an opcode.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Builtin {
    Print,
    Input,
    Math(MathOp),

    /// Any opcode without an action.
    Unknown(u32),
}

impl From<u32> for Builtin {
    fn from(opcode: u32) -> Self {
        match opcode {
            consts::OP_PRINT => Builtin::Print,
            consts::OP_INPUT => Builtin::Input,
            consts::OP_ADD => Builtin::Math(MathOp::Add),
            consts::OP_SUBTRACT => Builtin::Math(MathOp::Subtract),
            consts::OP_DIVIDE => Builtin::Math(MathOp::Divide),
            consts::OP_MULTIPLY => Builtin::Math(MathOp::Multiply),
            consts::OP_POWER => Builtin::Math(MathOp::Power),
            consts::OP_MODULO => Builtin::Math(MathOp::Modulo),
            n => Builtin::Unknown(n),
        }
    }
}

/// Arithmetic operators. They have opcodes, but no implementation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MathOp {
    Add,
    Subtract,
    Divide,
    Multiply,
    Power,
    Modulo,
}

impl Display for MathOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            MathOp::Add => "+",
            MathOp::Subtract => "-",
            MathOp::Divide => "/",
            MathOp::Multiply => "*",
            MathOp::Power => "^",
            MathOp::Modulo => "%",
        };
        f.write_str(symbol)
    }
}
