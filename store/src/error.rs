use thiserror::Error;

/// Failures reported by a ledger backend.
///
/// Protocol outcomes (a commitment already present, a reveal that lost its
/// race) are not errors here: the ledger reports them through `bool` returns
/// and leaves their meaning to the engine.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write-once entry, such as the ballot, was already set.
    #[error("{0} is already set")]
    Duplicate(String),

    /// The backend could not be read or written at all.
    #[error("ledger backend unavailable: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// Stored bytes violate the ledger's record format.
    #[error("ledger is corrupted: {0}")]
    Corruption(String),
}
