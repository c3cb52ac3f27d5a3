//! Per-vote status and the ledger record that carries it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ChoiceTag, Commitment};

/// Where a commitment is in its lifecycle.
///
/// A commitment the ledger has never seen has no status at all; the only
/// transition is `Pending -> Revealed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteStatus {
    /// Committed, choice still hidden.
    Pending,
    /// Choice and secret disclosed and verified against the commitment.
    Revealed,
}

impl VoteStatus {
    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Revealed => "Revealed",
        }
    }
}

impl fmt::Display for VoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One accepted commitment as held by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub commitment: Commitment,
    pub status: VoteStatus,
    /// The revealed choice. Always `None` while `Pending`.
    pub choice: Option<ChoiceTag>,
}

impl VoteRecord {
    pub fn pending(commitment: Commitment) -> Self {
        Self {
            commitment,
            status: VoteStatus::Pending,
            choice: None,
        }
    }

    /// Move a pending record to `Revealed`. Returns `false` if it was already revealed.
    pub fn reveal(&mut self, choice: ChoiceTag) -> bool {
        if self.status.is_revealed() {
            return false;
        }
        self.status = VoteStatus::Revealed;
        self.choice = Some(choice);
        true
    }

    /// Whether this record counts towards `choice` in the tally.
    pub fn counts_for(&self, choice: ChoiceTag) -> bool {
        self.status.is_revealed() && self.choice == Some(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_is_one_way() {
        let mut record = VoteRecord::pending(Commitment::new([1u8; 32]));
        assert!(!record.counts_for(ChoiceTag::First));
        assert!(record.reveal(ChoiceTag::First));
        assert!(record.counts_for(ChoiceTag::First));
        assert!(!record.reveal(ChoiceTag::Second));
        assert_eq!(record.choice, Some(ChoiceTag::First));
    }

    #[test]
    fn status_strings() {
        assert_eq!(VoteStatus::Pending.to_string(), "Pending");
        assert_eq!(VoteStatus::Revealed.to_string(), "Revealed");
    }
}
