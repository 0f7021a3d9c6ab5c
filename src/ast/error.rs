use crate::functions::Arity;

/// Why a formula could not be turned into a tree.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,

    #[error("{name} expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: &'static str,
        expected: Arity,
        found: usize,
    },

    #[error("malformed call: {0}")]
    MalformedCall(String),

    #[error("unrecognized token: {0}")]
    UnrecognizedToken(String),
}

/// Failure to read a plain numeric field such as a bound or a resolution.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseNumberError {
    #[error("invalid number: {0:?}")]
    Invalid(String),

    #[error("{text:?} evaluates to {value}, which is not finite")]
    NonFinite { text: String, value: f64 },
}
