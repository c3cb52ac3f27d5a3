//! Fundamental types for commit-reveal voting.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! commitments, choice tags, ballot configuration, vote statuses and voter secrets.

pub mod ballot;
pub mod choice;
pub mod commitment;
pub mod error;
pub mod scheme;
pub mod secret;
pub mod status;

pub use ballot::BallotConfig;
pub use choice::{ChoiceTag, Choices};
pub use commitment::Commitment;
pub use error::TypesError;
pub use scheme::CommitmentScheme;
pub use secret::Secret;
pub use status::{VoteRecord, VoteStatus};
