//! Ballot configuration storage trait.

use crate::StoreError;
use commitvote_types::BallotConfig;

/// Holds the one ballot a ledger was created for.
pub trait BallotStore: Send + Sync {
    /// Record the ballot. Fails with [`StoreError::Duplicate`] if one is already set;
    /// choices never change once voting can begin.
    fn put_ballot(&self, config: &BallotConfig) -> Result<(), StoreError>;

    /// The ballot, or `None` if the ledger has not been initialized.
    fn get_ballot(&self) -> Result<Option<BallotConfig>, StoreError>;
}
