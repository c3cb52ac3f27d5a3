//! Revealed-vote totals and winner determination.

use commitvote_types::ChoiceTag;

use crate::VoteError;

/// A snapshot of the ledger's counts.
///
/// Derived on every read, never stored: the ledger is the only source of truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tally {
    pub first: u64,
    pub second: u64,
    pub total: u64,
}

impl Tally {
    pub fn new(first: u64, second: u64, total: u64) -> Self {
        Self {
            first,
            second,
            total,
        }
    }

    pub fn revealed_for(&self, choice: ChoiceTag) -> u64 {
        match choice {
            ChoiceTag::First => self.first,
            ChoiceTag::Second => self.second,
        }
    }

    pub fn revealed(&self) -> u64 {
        self.first + self.second
    }

    /// Committed but not yet revealed.
    pub fn pending(&self) -> u64 {
        self.total.saturating_sub(self.revealed())
    }

    /// The choice with strictly more revealed votes.
    pub fn winner(&self) -> Result<ChoiceTag, VoteError> {
        match self.first.cmp(&self.second) {
            std::cmp::Ordering::Greater => Ok(ChoiceTag::First),
            std::cmp::Ordering::Less => Ok(ChoiceTag::Second),
            std::cmp::Ordering::Equal if self.first == 0 => Err(VoteError::NoRevealedVotes),
            std::cmp::Ordering::Equal => Err(VoteError::Tie(self.first)),
        }
    }
}
