//! Abstract ledger traits for commit-reveal voting.
//!
//! Every ledger backend (LMDB, in-memory for testing, a remote authoritative
//! ledger) implements these traits. The engine depends only on the traits.

pub mod ballot;
pub mod error;
pub mod ledger;

pub use ballot::BallotStore;
pub use error::StoreError;
pub use ledger::VoteLedger;
