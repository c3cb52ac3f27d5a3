//! Errors raised while constructing or parsing domain types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid choice tag {0}: expected 1 or 2")]
    InvalidChoiceTag(u8),

    #[error("choice labels must not be empty")]
    EmptyChoiceLabel,

    #[error("choice labels must differ, both are {0:?}")]
    DuplicateChoiceLabel(String),

    #[error("invalid commitment hex: {0}")]
    InvalidCommitmentHex(String),

    #[error("invalid commitment length: expected 32 bytes, got {0}")]
    InvalidCommitmentLength(usize),

    #[error("unknown commitment scheme: {0}")]
    UnknownScheme(String),
}
