//! Commitment preimage encodings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Selects how `(tag, secret)` is encoded and hashed into a [`Commitment`].
///
/// A ballot fixes its scheme at creation; commit and reveal must agree on it.
///
/// [`Commitment`]: crate::Commitment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitmentScheme {
    /// `keccak256(decimal(tag) || "~" || secret)`.
    ///
    /// Compatible with commitments produced by existing Ethereum tooling.
    #[default]
    Keccak256,
    /// `blake2b_256("commitvote:v1" || tag byte || "~" || secret)`.
    Blake2bV1,
}

impl CommitmentScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keccak256 => "keccak256",
            Self::Blake2bV1 => "blake2b-v1",
        }
    }
}

impl fmt::Display for CommitmentScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitmentScheme {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keccak256" => Ok(Self::Keccak256),
            "blake2b-v1" => Ok(Self::Blake2bV1),
            _ => Err(TypesError::UnknownScheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_as_str() {
        for scheme in [CommitmentScheme::Keccak256, CommitmentScheme::Blake2bV1] {
            assert_eq!(scheme.as_str().parse::<CommitmentScheme>().unwrap(), scheme);
        }
        assert!("sha1".parse::<CommitmentScheme>().is_err());
    }
}
