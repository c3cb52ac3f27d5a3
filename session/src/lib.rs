//! Label-facing voting sessions.
//!
//! A [`VotingSession`] resolves the ballot stored in a ledger once, then
//! translates choice labels to tags for the [`CommitRevealEngine`](commitvote_engine::CommitRevealEngine).

pub mod error;
pub mod session;

pub use error::SessionError;
pub use session::{ChoiceCount, SessionTally, VotingSession};
