//! Nullable infrastructure for deterministic testing.
//!
//! The ledger is abstracted behind the `commitvote-store` traits. This crate
//! provides a test-friendly implementation that:
//! - Keeps everything in memory and never touches the filesystem or network
//! - Honours the same atomic compare-and-set contract as a real ledger
//! - Can be told to fail reads or writes, to exercise ledger error paths
//!
//! Usage: swap the LMDB ledger for [`NullLedger`] in tests.

pub mod ledger;

pub use ledger::NullLedger;
