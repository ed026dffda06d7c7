//! Expression engine errors.

use thiserror::Error;

/// Errors raised while tokenizing, parsing or evaluating an expression.
///
/// The `Display` text is what callers see after the `calculation error: `
/// prefix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The input is not a well-formed arithmetic expression.
    #[error("invalid syntax: {message} at position {position}")]
    Syntax { message: String, position: usize },

    /// The input exceeds the accepted length.
    #[error("expression is longer than {max} characters")]
    TooLong { max: usize },

    /// The input nests parentheses or operators too deeply.
    #[error("expression is nested deeper than {max} levels")]
    TooDeep { max: usize },

    /// A name outside the allow-list.
    #[error("name '{0}' is not defined")]
    UnknownName(String),

    /// A constant used as a function.
    #[error("'{0}' is not callable")]
    NotCallable(&'static str),

    /// A function used as a value.
    #[error("function '{0}' must be called")]
    UncalledFunction(&'static str),

    /// A function called with the wrong number of arguments.
    #[error("{name}() takes {expected} ({given} given)")]
    Arity {
        name: &'static str,
        expected: &'static str,
        given: usize,
    },

    /// Division or modulo by zero.
    #[error("{0}")]
    ZeroDivision(&'static str),

    /// Argument outside a function's mathematical domain.
    #[error("math domain error")]
    Domain,

    /// Result does not fit the numeric representation.
    #[error("{0}")]
    Overflow(&'static str),

    /// Operand of an unsupported kind.
    #[error("{0}")]
    Type(String),
}

impl CalcError {
    /// Create a syntax error at the given byte offset.
    pub fn syntax(message: impl Into<String>, position: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn integer_overflow() -> Self {
        Self::Overflow("integer overflow")
    }
}
