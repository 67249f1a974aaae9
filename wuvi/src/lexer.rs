use std::ops::Range;

use logos::{Lexer, Logos};

/// A whitespace-delimited Wuvi token. Vocabulary words are only
/// recognized when they make up the whole token; anything else is a
/// [`Token::Word`].
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    #[token("init")]
    Init,

    #[token("=")]
    Assign,

    // Type markers
    #[token(">>+>")]
    StringMarker,

    #[token("<<-")]
    IntegerMarker,

    #[token(">>+>>")]
    FloatMarker,

    #[token(">><<++--__")]
    DoubleMarker,

    /// `<<>>`, the true literal; also accepted as a Bool type marker
    #[token("<<>>")]
    TrueMarker,

    /// `>>`, the false literal and the Bool type marker
    #[token(">>")]
    FalseMarker,

    #[token("_+_")]
    CharMarker,

    #[token("_-_")]
    NullMarker,

    /// Names, literals, opcodes
    #[regex(r"[^ \t\r\n\f\v]+")]
    Word,

    #[regex(r"[ \t\r\n\f\v]+", logos::skip)]
    #[error]
    Error,
}

/// A token together with its source text and its byte range in the
/// line it came from.
#[derive(Debug, PartialEq, Clone)]
pub struct Lexeme<'source> {
    pub token: Token,
    pub text: &'source str,
    pub span: Range<usize>,
}

/// Split a single line into its tokens.
pub fn tokenize(line: &str) -> Vec<Lexeme<'_>> {
    let mut lexer: Lexer<Token> = Token::lexer(line);
    let mut lexemes = vec![];

    while let Some(token) = lexer.next() {
        lexemes.push(Lexeme {
            token,
            text: lexer.slice(),
            span: lexer.span(),
        });
    }

    lexemes
}
