//! Wuvi statement classifier
//!
//! Wuvi has no real grammar: each line is looked at on its own and
//! either becomes a statement or is silently skipped. The parser is an
//! iterator so a caller can run every statement as soon as its line has
//! been read.

use std::{iter::Enumerate, str::Lines};

use crate::{
    ast::{Builtin, Stmt, StmtKind, Word},
    consts,
    lexer::{tokenize, Lexeme, Token},
    variables::Tag,
};

/// Tokens a definition header needs before it counts as one.
pub const MIN_HEADER_TOKENS: usize = 5;

/// Wuvi parser
pub struct Parser<'source> {
    lines: Enumerate<Lines<'source>>,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            lines: source.lines().enumerate(),
        }
    }

    /// Classify every remaining line.
    pub fn parse(&mut self) -> Vec<Stmt> {
        self.collect()
    }

    /// Classify one line. `None` means the line isn't a statement.
    fn classify(&mut self, line: usize, lexemes: &[Lexeme]) -> Option<Stmt> {
        let kind = match lexemes {
            [] => return None,
            [first, ..] if first.token == Token::Init => self.define(lexemes)?,
            [ident, assign, marker, rest @ ..] if assign.token == Token::Assign => {
                StmtKind::Assign {
                    ident: word(ident),
                    tag: Tag::from_token(marker.token),
                    literal: rest.first().map(word),
                }
            }
            [opcode, arg, ..] => StmtKind::Call {
                builtin: Builtin::from(opcode.text.parse::<u32>().ok()?),
                arg: word(arg),
            },
            [_] => return None,
        };

        Some(Stmt::new(kind, line))
    }

    /// Capture a function body. Lines are taken raw up to the first
    /// line that contains the terminator anywhere, even inside a word:
    /// `pending` ends a body just like `end` does.
    fn define(&mut self, header: &[Lexeme]) -> Option<StmtKind> {
        if header.len() < MIN_HEADER_TOKENS {
            return None;
        }

        let mut body = vec![];
        let mut terminated = false;
        for (_, line) in self.lines.by_ref() {
            if line.contains(consts::TERMINATOR) {
                terminated = true;
                break;
            }
            body.push(line.to_owned());
        }

        Some(StmtKind::Define {
            ident: word(&header[1]),
            body,
            terminated,
        })
    }
}

impl<'source> Iterator for Parser<'source> {
    type Item = Stmt;

    fn next(&mut self) -> Option<Stmt> {
        while let Some((index, text)) = self.lines.next() {
            let lexemes = tokenize(text);
            if let Some(stmt) = self.classify(index + 1, &lexemes) {
                tracing::trace!(line = stmt.line, "classified {:?}", stmt.kind);
                return Some(stmt);
            }
        }

        None
    }
}

fn word(lexeme: &Lexeme) -> Word {
    Word::new(lexeme.text.to_owned(), lexeme.span.clone())
}
