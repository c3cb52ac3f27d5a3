//! Commit-reveal voting engine.
//!
//! Two phases: a voter first publishes a commitment hiding their choice, then
//! later reveals the choice and secret so anyone can check the commitment was
//! honestly formed. Per commitment the lifecycle is
//! `Unknown → Pending → Revealed`, with `Revealed` terminal.
//!
//! The engine keeps no mutable state of its own. Every fact lives in the
//! injected [`VoteLedger`](commitvote_store::VoteLedger), and the only writes
//! are the ledger's atomic compare-and-set calls.

pub mod engine;
pub mod error;
pub mod tally;

pub use engine::CommitRevealEngine;
pub use error::VoteError;
pub use tally::Tally;
