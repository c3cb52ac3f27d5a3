use commitvote_crypto::CryptoError;
use commitvote_types::Commitment;
use thiserror::Error;

/// Every way a vote, reveal or query can fail.
///
/// All variants reach the caller unchanged; the engine never retries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoteError {
    #[error("invalid choice {0:?}")]
    InvalidChoice(String),

    #[error("secret must not be empty")]
    EmptySecret,

    #[error("commitment {0} has already been recorded")]
    DuplicateCommitment(Commitment),

    #[error("choice and secret hash to {recomputed}, not the claimed {claimed}")]
    CommitmentMismatch {
        claimed: Commitment,
        recomputed: Commitment,
    },

    #[error("commitment {0} is not in the ledger")]
    UnknownCommitment(Commitment),

    #[error("commitment {0} has already been revealed")]
    AlreadyRevealed(Commitment),

    #[error("no votes have been revealed")]
    NoRevealedVotes,

    #[error("tie: both choices have {0} revealed votes")]
    Tie(u64),

    #[error("ledger read failed: {0}")]
    LedgerReadFailed(String),

    #[error("ledger write failed: {0}")]
    LedgerWriteFailed(String),
}

impl VoteError {
    /// Whether a caller may reasonably retry the same call.
    ///
    /// Only ledger failures qualify; every other variant is a protocol fact
    /// that a retry would not change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LedgerReadFailed(_) | Self::LedgerWriteFailed(_))
    }
}

impl From<CryptoError> for VoteError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::EmptySecret => VoteError::EmptySecret,
        }
    }
}
