//! Vote ledger trait.

use crate::StoreError;
use commitvote_types::{ChoiceTag, Commitment, VoteStatus};

/// The authoritative record of commitments and their statuses.
///
/// Each method must be atomic with respect to every other. In particular
/// `put_if_absent` and `mark_revealed` are compare-and-set operations: the
/// check and the write happen under one transaction or lock, so concurrent
/// voters cannot both claim a slot or both count one reveal.
pub trait VoteLedger: Send + Sync {
    /// Record `commitment` as `Pending` iff no entry exists.
    ///
    /// Returns `true` if the entry was inserted.
    fn put_if_absent(&self, commitment: &Commitment) -> Result<bool, StoreError>;

    /// Status of `commitment`, `None` if the ledger has never seen it.
    fn get_status(&self, commitment: &Commitment) -> Result<Option<VoteStatus>, StoreError>;

    /// Transition a `Pending` entry to `Revealed`, recording the revealed choice.
    ///
    /// The choice is passed in because the commitment alone hides it. Returns
    /// `false` if the entry is missing or already revealed; nothing is written then.
    fn mark_revealed(&self, commitment: &Commitment, choice: ChoiceTag)
        -> Result<bool, StoreError>;

    /// All commitments in insertion order.
    fn list_commitments(&self) -> Result<Vec<Commitment>, StoreError>;

    /// Number of revealed entries whose revealed choice is `choice`.
    fn count_revealed_for(&self, choice: ChoiceTag) -> Result<u64, StoreError>;

    /// Number of entries regardless of status.
    fn commitment_count(&self) -> Result<u64, StoreError>;
}
