//! The commit-reveal state machine.

use std::sync::Arc;

use commitvote_store::{StoreError, VoteLedger};
use commitvote_types::{ChoiceTag, Commitment, CommitmentScheme, VoteStatus};

use crate::error::VoteError;
use crate::tally::Tally;

/// Accepts commits and verified reveals against a [`VoteLedger`].
///
/// Holds only the ledger handle and the ballot's commitment scheme, both
/// immutable, so one engine can be shared by any number of threads.
pub struct CommitRevealEngine<L> {
    ledger: Arc<L>,
    scheme: CommitmentScheme,
}

impl<L> Clone for CommitRevealEngine<L> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            scheme: self.scheme,
        }
    }
}

fn read_failed(e: StoreError) -> VoteError {
    VoteError::LedgerReadFailed(e.to_string())
}

fn write_failed(e: StoreError) -> VoteError {
    VoteError::LedgerWriteFailed(e.to_string())
}

fn parse_tag(raw: u8) -> Result<ChoiceTag, VoteError> {
    ChoiceTag::try_from(raw).map_err(|_| VoteError::InvalidChoice(raw.to_string()))
}

impl<L: VoteLedger> CommitRevealEngine<L> {
    pub fn new(ledger: Arc<L>, scheme: CommitmentScheme) -> Self {
        Self { ledger, scheme }
    }

    pub fn scheme(&self) -> CommitmentScheme {
        self.scheme
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// The commitment `vote` would record for `(tag, secret)`, without touching the ledger.
    pub fn commitment_for(&self, tag: ChoiceTag, secret: &[u8]) -> Result<Commitment, VoteError> {
        Ok(commitvote_crypto::commit(self.scheme, tag, secret)?)
    }

    /// Commit to a hidden vote.
    ///
    /// Only the commitment is stored; the caller must keep `(tag, secret)` to
    /// reveal later. Re-submitting the same pair fails with
    /// [`VoteError::DuplicateCommitment`].
    pub fn vote(&self, tag: u8, secret: &[u8]) -> Result<Commitment, VoteError> {
        let tag = parse_tag(tag)?;
        let commitment = self.commitment_for(tag, secret)?;

        let inserted = self
            .ledger
            .put_if_absent(&commitment)
            .map_err(write_failed)?;
        if !inserted {
            tracing::warn!(%commitment, "rejected duplicate commitment");
            return Err(VoteError::DuplicateCommitment(commitment));
        }

        tracing::info!(%commitment, "recorded commitment");
        Ok(commitment)
    }

    /// Reveal a previously committed vote.
    ///
    /// `(tag, secret)` must hash to `claimed`, and `claimed` must be pending
    /// in the ledger. On success the vote counts towards `tag` from the next
    /// read on.
    pub fn reveal(&self, tag: u8, secret: &[u8], claimed: &Commitment) -> Result<(), VoteError> {
        let tag = parse_tag(tag)?;
        let recomputed = self.commitment_for(tag, secret)?;
        if recomputed != *claimed {
            tracing::warn!(%claimed, "reveal does not match commitment");
            return Err(VoteError::CommitmentMismatch {
                claimed: *claimed,
                recomputed,
            });
        }

        match self.ledger.get_status(&recomputed).map_err(read_failed)? {
            None => return Err(VoteError::UnknownCommitment(recomputed)),
            Some(VoteStatus::Revealed) => return Err(VoteError::AlreadyRevealed(recomputed)),
            Some(VoteStatus::Pending) => {}
        }

        let revealed = self
            .ledger
            .mark_revealed(&recomputed, tag)
            .map_err(write_failed)?;
        if !revealed {
            // Another reveal of the same commitment won between our read and write.
            return Err(VoteError::LedgerWriteFailed(format!(
                "commitment {} was no longer pending",
                recomputed
            )));
        }

        tracing::info!(commitment = %recomputed, choice = %tag, "revealed vote");
        Ok(())
    }

    pub fn status(&self, commitment: &Commitment) -> Result<VoteStatus, VoteError> {
        self.ledger
            .get_status(commitment)
            .map_err(read_failed)?
            .ok_or(VoteError::UnknownCommitment(*commitment))
    }

    /// Every recorded commitment, in the order the ledger accepted them.
    pub fn list_commitments(&self) -> Result<Vec<Commitment>, VoteError> {
        self.ledger.list_commitments().map_err(read_failed)
    }

    /// Pending and revealed votes together.
    pub fn total_votes(&self) -> Result<u64, VoteError> {
        self.ledger.commitment_count().map_err(read_failed)
    }

    pub fn revealed_for(&self, choice: ChoiceTag) -> Result<u64, VoteError> {
        self.ledger.count_revealed_for(choice).map_err(read_failed)
    }

    pub fn tally(&self) -> Result<Tally, VoteError> {
        // Revealed counts first: records only grow, so the total read after
        // them can never be smaller than their sum.
        let first = self.revealed_for(ChoiceTag::First)?;
        let second = self.revealed_for(ChoiceTag::Second)?;
        let total = self.total_votes()?;
        Ok(Tally::new(first, second, total))
    }

    pub fn winner(&self) -> Result<ChoiceTag, VoteError> {
        let first = self.revealed_for(ChoiceTag::First)?;
        let second = self.revealed_for(ChoiceTag::Second)?;
        Tally::new(first, second, first + second).winner()
    }
}
