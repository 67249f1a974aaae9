use std::fmt::{self, Display};

use crate::{consts, error::ErrorKind, lexer::Token};

/// The type a Wuvi value carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    String,
    Integer,
    Float,
    Double,
    Bool,
    Char,
    Null,
}

impl Tag {
    /// Map a type marker to its tag. Anything that isn't a marker is
    /// `Null`.
    pub fn from_token(token: Token) -> Self {
        match token {
            Token::StringMarker => Tag::String,
            Token::IntegerMarker => Tag::Integer,
            Token::FloatMarker => Tag::Float,
            Token::DoubleMarker => Tag::Double,
            Token::TrueMarker | Token::FalseMarker => Tag::Bool,
            Token::CharMarker => Tag::Char,
            Token::NullMarker => Tag::Null,
            Token::Init | Token::Assign | Token::Word | Token::Error => Tag::Null,
        }
    }

    /// Same as [`Tag::from_token`], starting from raw text. Text that
    /// isn't exactly one token is `Null`.
    pub fn from_marker(text: &str) -> Self {
        match crate::lexer::tokenize(text).as_slice() {
            [lexeme] => Self::from_token(lexeme.token),
            _ => Tag::Null,
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tag::String => "String",
            Tag::Integer => "Integer",
            Tag::Float => "Float",
            Tag::Double => "Double",
            Tag::Bool => "Bool",
            Tag::Char => "Char",
            Tag::Null => "Null",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i32),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    Null,
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Str(_) => Tag::String,
            Value::Int(_) => Tag::Integer,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::Bool(_) => Tag::Bool,
            Value::Char(_) => Tag::Char,
            Value::Null => Tag::Null,
        }
    }

    /// The value a variable gets when its assignment has no literal.
    pub fn empty(tag: Tag) -> Self {
        match tag {
            Tag::String => Value::Str(String::new()),
            Tag::Integer => Value::Int(0),
            Tag::Float => Value::Float(0.0),
            Tag::Double => Value::Double(0.0),
            Tag::Bool => Value::Bool(false),
            Tag::Char => Value::Char('\0'),
            Tag::Null => Value::Null,
        }
    }

    /// Build a value of type `tag` out of a literal token.
    ///
    /// Numeric literals must be the whole token; `42abc` is an error,
    /// as is a float literal too large or too small for its type
    /// (`1e39` or `1e-50` as a Float). Bool literals
    /// never fail: anything but the true literal is false.
    pub fn coerce(tag: Tag, literal: &str) -> Result<Self, ErrorKind> {
        let invalid = || ErrorKind::ParseError {
            token: literal.to_owned(),
            expected: tag,
        };

        Ok(match tag {
            Tag::String => Value::Str(literal.to_owned()),
            Tag::Integer => Value::Int(literal.parse().map_err(|_| invalid())?),
            Tag::Float => {
                let value: f32 = literal.parse().map_err(|_| invalid())?;
                if out_of_range(value.is_infinite(), value == 0.0, literal) {
                    return Err(invalid());
                }
                Value::Float(value)
            }
            Tag::Double => {
                let value: f64 = literal.parse().map_err(|_| invalid())?;
                if out_of_range(value.is_infinite(), value == 0.0, literal) {
                    return Err(invalid());
                }
                Value::Double(value)
            }
            Tag::Bool => Value::Bool(literal == consts::TRUE_LITERAL),
            Tag::Char => Value::Char(literal.chars().next().ok_or_else(invalid)?),
            Tag::Null => Value::Null,
        })
    }
}

/// Whether a parsed float lost its literal to overflow or underflow.
/// An infinite result is fine when the literal spelled out `inf`, and
/// a zero result is fine when the mantissa had no non-zero digit.
fn out_of_range(infinite: bool, zero: bool, literal: &str) -> bool {
    if infinite {
        return !literal
            .trim_start_matches(['+', '-'])
            .to_ascii_lowercase()
            .starts_with("inf");
    }

    let mantissa = literal.split(['e', 'E']).next().unwrap_or(literal);
    zero && mantissa.chars().any(|c| ('1'..='9').contains(&c))
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write_general(f, f64::from(*x)),
            Value::Double(x) => write_general(f, *x),
            Value::Bool(true) => f.write_str(consts::TRUE_LITERAL),
            Value::Bool(false) => f.write_str(consts::FALSE_LITERAL),
            Value::Char(c) => write!(f, "{}", c),
            Value::Null => f.write_str(consts::NULL_MARKER),
        }
    }
}

/// Significant digits shown for floating point values.
const PRECISION: i32 = 6;

/// Write a float in "general" notation: `PRECISION` significant
/// digits, no trailing zeros, switching to scientific notation for
/// very large or very small magnitudes (`1e+10`, `1e-05`).
fn write_general(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str(if x.is_sign_negative() { "-nan" } else { "nan" });
    }
    if x.is_infinite() {
        return f.write_str(if x < 0.0 { "-inf" } else { "inf" });
    }
    if x == 0.0 {
        return f.write_str(if x.is_sign_negative() { "-0" } else { "0" });
    }

    // The exponent has to be taken after rounding, 999999.7 becomes
    // 1e+06 rather than 999999.
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, x);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(
            f,
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let fixed = format!("{:.*}", (PRECISION - 1 - exponent) as usize, x);
        f.write_str(trim_fraction(&fixed))
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// A captured, never executed, function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// The raw body lines, in source order.
    pub body: Vec<String>,

    /// Line of the `init` header, starting at 1.
    pub line: usize,

    /// False if the input ran out before a terminator line.
    pub terminated: bool,
}
