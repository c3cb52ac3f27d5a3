use commitvote_store::StoreError;
use thiserror::Error;

/// Failures while binding a session to a ledger.
///
/// Once a session is open, operations fail with
/// [`VoteError`](commitvote_engine::VoteError) instead.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no ballot has been created on this ledger")]
    NotInitialized,

    #[error("a ballot already exists on this ledger")]
    AlreadyInitialized,

    #[error("ledger error: {0}")]
    Ledger(#[from] StoreError),
}
