//! The public error surface of the crate.
//!
//! Every fallible operation returns one of the kinds below. Errors are
//! reported synchronously at the point of detection and are never retried
//! internally; as all values are immutable, a failed operation leaves
//! nothing in a partially-updated state.

use thiserror::Error;

/// The reason a string could not be turned into a polynomial, rational
/// function or variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input is not a well-formed expression.
    Malformed,
    /// The input is a well-formed expression but not a polynomial,
    /// for example because it contains a division.
    NotPolynomial,
    /// The input is not an acceptable variable name.
    InvalidName,
}

/// Errors produced by the polynomial engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An argument of a kind the operation cannot accept. Reserved for
    /// binding layers that dispatch on runtime types; the typed Rust API
    /// rarely produces it.
    #[error("invalid argument: {0}")]
    InvalidArgumentType(&'static str),

    /// Malformed textual input.
    #[error("invalid string for {target}: `{input}'")]
    Parse {
        kind: ParseErrorKind,
        target: &'static str,
        input: String,
    },

    /// A variable set that cannot accommodate the variables actually used.
    #[error("invalid set of variables")]
    InvalidVariableSet,

    /// Division by zero, in any of its guises.
    #[error("division by zero")]
    DivisionByZero,

    /// Exact division requested but the remainder is nonzero.
    #[error("not divisible")]
    NotDivisible,

    /// A structurally valid argument with an unacceptable value, e.g. a
    /// negative polynomial power or mismatched parallel lists.
    #[error("{0}")]
    InvalidArgumentValue(&'static str),
}

impl Error {
    pub(crate) fn parse(kind: ParseErrorKind, target: &'static str, input: &str) -> Error {
        Error::Parse {
            kind,
            target,
            input: input.to_owned(),
        }
    }

    /// The parse-error detail, if this is a parse error.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            Error::Parse { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the public API.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Error::DivisionByZero.to_string(), "division by zero");
        assert_eq!(Error::NotDivisible.to_string(), "not divisible");
        assert_eq!(
            Error::InvalidVariableSet.to_string(),
            "invalid set of variables"
        );
        assert_eq!(
            Error::parse(ParseErrorKind::Malformed, "polynomial", "1+/").to_string(),
            "invalid string for polynomial: `1+/'"
        );
        assert_eq!(
            Error::parse(ParseErrorKind::InvalidName, "variable", "$x").parse_kind(),
            Some(ParseErrorKind::InvalidName)
        );
    }
}
