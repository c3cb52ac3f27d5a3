//! LMDB ledger backend for commit-reveal voting.
//!
//! Implements the `commitvote-store` traits using the `heed` LMDB bindings.
//! Every compare-and-set runs inside a single LMDB write transaction; LMDB
//! serializes writers, which is what makes `put_if_absent` and
//! `mark_revealed` atomic across threads and processes.

pub mod ballot;
pub mod environment;
pub mod error;
pub mod integrity;
pub mod ledger;
pub mod migration;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_integrity, IntegrityReport};
pub use ledger::LmdbLedger;
