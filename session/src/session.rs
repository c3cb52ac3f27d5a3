use std::sync::Arc;

use serde::Serialize;

use commitvote_engine::{CommitRevealEngine, Tally, VoteError};
use commitvote_store::{BallotStore, StoreError, VoteLedger};
use commitvote_types::{BallotConfig, ChoiceTag, Choices, Commitment, CommitmentScheme, VoteStatus};

use crate::SessionError;

/// Revealed votes for one labelled choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceCount {
    pub tag: u8,
    pub label: String,
    pub revealed: u64,
}

/// A [`Tally`] with the ballot's labels attached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionTally {
    pub choices: [ChoiceCount; 2],
    pub pending: u64,
    pub total: u64,
}

/// A ballot bound to its ledger.
///
/// Only constructed through [`open`](Self::open) or
/// [`initialize`](Self::initialize), so every session has resolved choices.
pub struct VotingSession<L> {
    engine: CommitRevealEngine<L>,
    choices: Choices,
}

impl<L> Clone for VotingSession<L> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            choices: self.choices.clone(),
        }
    }
}

impl<L: VoteLedger + BallotStore> VotingSession<L> {
    /// Bind to the ballot already stored in `ledger`.
    pub fn open(ledger: Arc<L>) -> Result<Self, SessionError> {
        let config = ledger.get_ballot()?.ok_or(SessionError::NotInitialized)?;
        tracing::debug!(
            first = config.choices.first(),
            second = config.choices.second(),
            scheme = %config.scheme,
            "opened voting session"
        );
        Ok(Self {
            engine: CommitRevealEngine::new(ledger, config.scheme),
            choices: config.choices,
        })
    }

    /// Store `config` as the ledger's ballot, then open it.
    ///
    /// A ledger holds at most one ballot for its lifetime.
    pub fn initialize(ledger: Arc<L>, config: BallotConfig) -> Result<Self, SessionError> {
        match ledger.put_ballot(&config) {
            Ok(()) => {}
            Err(StoreError::Duplicate(_)) => return Err(SessionError::AlreadyInitialized),
            Err(e) => return Err(SessionError::Ledger(e)),
        }
        tracing::info!(
            first = config.choices.first(),
            second = config.choices.second(),
            scheme = %config.scheme,
            "created ballot"
        );
        Self::open(ledger)
    }

    fn tag(&self, label: &str) -> Result<ChoiceTag, VoteError> {
        self.choices
            .tag_for(label)
            .ok_or_else(|| VoteError::InvalidChoice(label.to_string()))
    }

    /// Commit a hidden vote for the choice labelled `label`.
    pub fn vote(&self, label: &str, secret: &[u8]) -> Result<Commitment, VoteError> {
        let tag = self.tag(label)?;
        let commitment = self.engine.vote(tag.as_u8(), secret)?;
        tracing::debug!(%commitment, status = %VoteStatus::Pending, "vote recorded");
        Ok(commitment)
    }

    /// Reveal the vote behind `commitment`.
    pub fn reveal(
        &self,
        label: &str,
        secret: &[u8],
        commitment: &Commitment,
    ) -> Result<(), VoteError> {
        let tag = self.tag(label)?;
        self.engine.reveal(tag.as_u8(), secret, commitment)?;
        tracing::debug!(%commitment, status = %VoteStatus::Revealed, "reveal recorded");
        Ok(())
    }

    pub fn vote_status(&self, commitment: &Commitment) -> Result<VoteStatus, VoteError> {
        self.engine.status(commitment)
    }

    pub fn list_commitments(&self) -> Result<Vec<Commitment>, VoteError> {
        self.engine.list_commitments()
    }

    pub fn total_votes(&self) -> Result<u64, VoteError> {
        self.engine.total_votes()
    }

    /// Label of the choice with strictly more revealed votes.
    pub fn winner(&self) -> Result<String, VoteError> {
        let tag = self.engine.winner()?;
        Ok(self.choices.label(tag).to_string())
    }

    pub fn tally(&self) -> Result<SessionTally, VoteError> {
        let tally = self.engine.tally()?;
        Ok(self.label_tally(&tally))
    }

    fn label_tally(&self, tally: &Tally) -> SessionTally {
        let count = |tag: ChoiceTag| ChoiceCount {
            tag: tag.as_u8(),
            label: self.choices.label(tag).to_string(),
            revealed: tally.revealed_for(tag),
        };
        SessionTally {
            choices: [count(ChoiceTag::First), count(ChoiceTag::Second)],
            pending: tally.pending(),
            total: tally.total,
        }
    }

    pub fn choices(&self) -> &Choices {
        &self.choices
    }

    pub fn scheme(&self) -> CommitmentScheme {
        self.engine.scheme()
    }

    pub fn engine(&self) -> &CommitRevealEngine<L> {
        &self.engine
    }
}
