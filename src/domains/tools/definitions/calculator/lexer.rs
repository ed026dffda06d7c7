//! Tokenizer for arithmetic expressions.
//!
//! Only numbers, names, arithmetic and comparison operators, parentheses and
//! commas are recognized. Every other character is rejected here, before any
//! parsing happens.

use std::fmt;

use super::error::CalcError;

/// Kinds of tokens produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Int(i64),
    Float(f64),
    Name(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,
    Eof,
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "number {}", value),
            Self::Float(value) => write!(f, "number {}", value),
            Self::Name(name) => write!(f, "name '{}'", name),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::DoubleStar => f.write_str("'**'"),
            Self::Slash => f.write_str("'/'"),
            Self::DoubleSlash => f.write_str("'//'"),
            Self::Percent => f.write_str("'%'"),
            Self::Caret => f.write_str("'^'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Comma => f.write_str("','"),
            Self::Lt => f.write_str("'<'"),
            Self::Le => f.write_str("'<='"),
            Self::Gt => f.write_str("'>'"),
            Self::Ge => f.write_str("'>='"),
            Self::EqEq => f.write_str("'=='"),
            Self::NotEq => f.write_str("'!='"),
            Self::Eof => f.write_str("end of expression"),
        }
    }
}

/// Split `input` into tokens. The result always ends with [`TokenKind::Eof`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        let start = i;

        if byte.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if byte.is_ascii_digit()
            || (byte == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
        {
            let (kind, end) = lex_number(input, start)?;
            tokens.push(Token {
                kind,
                position: start,
            });
            i = end;
            continue;
        }

        if byte.is_ascii_alphabetic() || byte == b'_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Name(input[start..i].to_string()),
                position: start,
            });
            continue;
        }

        let next = bytes.get(i + 1).copied();
        let (kind, width) = match (byte, next) {
            (b'*', Some(b'*')) => (TokenKind::DoubleStar, 2),
            (b'/', Some(b'/')) => (TokenKind::DoubleSlash, 2),
            (b'<', Some(b'=')) => (TokenKind::Le, 2),
            (b'>', Some(b'=')) => (TokenKind::Ge, 2),
            (b'=', Some(b'=')) => (TokenKind::EqEq, 2),
            (b'!', Some(b'=')) => (TokenKind::NotEq, 2),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'-', _) => (TokenKind::Minus, 1),
            (b'*', _) => (TokenKind::Star, 1),
            (b'/', _) => (TokenKind::Slash, 1),
            (b'%', _) => (TokenKind::Percent, 1),
            (b'^', _) => (TokenKind::Caret, 1),
            (b'(', _) => (TokenKind::LParen, 1),
            (b')', _) => (TokenKind::RParen, 1),
            (b',', _) => (TokenKind::Comma, 1),
            (b'<', _) => (TokenKind::Lt, 1),
            (b'>', _) => (TokenKind::Gt, 1),
            _ => {
                let ch = input[start..].chars().next().unwrap_or('?');
                return Err(CalcError::syntax(
                    format!("unexpected character '{}'", ch),
                    start,
                ));
            }
        };
        tokens.push(Token {
            kind,
            position: start,
        });
        i += width;
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        position: input.len(),
    });
    Ok(tokens)
}

/// Lex an integer or float literal starting at `start`.
///
/// Single underscores may separate digits (`1_000`). Returns the token and
/// the offset just past the literal.
fn lex_number(input: &str, start: usize) -> Result<(TokenKind, usize), CalcError> {
    let bytes = input.as_bytes();
    let mut is_float = false;

    let mut i = skip_digits(bytes, start);

    if i < bytes.len() && bytes[i] == b'.' {
        is_float = true;
        i = skip_digits(bytes, i + 1);
    }

    // An exponent is only consumed when digits follow, so `2*e` stays a name.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            is_float = true;
            i = skip_digits(bytes, j);
        }
    }

    let text = &input[start..i];

    if i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        return Err(CalcError::syntax(
            format!("invalid number literal '{}{}'", text, bytes[i] as char),
            start,
        ));
    }

    let digits = text.replace('_', "");
    let kind = if is_float {
        let value = digits
            .parse::<f64>()
            .map_err(|_| CalcError::syntax(format!("invalid number literal '{}'", text), start))?;
        TokenKind::Float(value)
    } else {
        let value = digits
            .parse::<i64>()
            .map_err(|_| CalcError::Overflow("integer literal too large"))?;
        TokenKind::Int(value)
    };

    Ok((kind, i))
}

/// Offset just past a run of digits starting at `i`. An underscore is part
/// of the run only when it sits between two digits.
fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    let run_start = i;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            i += 1;
        } else if bytes[i] == b'_'
            && i > run_start
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
        {
            i += 2;
        } else {
            break;
        }
    }
    i
}
