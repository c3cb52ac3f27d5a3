//! Ballot configuration, fixed once when a ballot is created.

use serde::{Deserialize, Serialize};

use crate::{Choices, CommitmentScheme};

/// Everything a session needs to resolve from the ledger before it can accept votes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotConfig {
    pub choices: Choices,
    #[serde(default)]
    pub scheme: CommitmentScheme,
}

impl BallotConfig {
    pub fn new(choices: Choices, scheme: CommitmentScheme) -> Self {
        Self { choices, scheme }
    }
}
