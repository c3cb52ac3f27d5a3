//! LMDB implementation of VoteLedger.
//!
//! Record value format: `[status, tag]` where status is `0` (Pending) or
//! `1` (Revealed) and tag is `0` while pending, else the revealed choice tag.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use commitvote_store::{StoreError, VoteLedger};
use commitvote_types::{ChoiceTag, Commitment, VoteStatus};

use crate::LmdbError;

const STATUS_PENDING: u8 = 0;
const STATUS_REVEALED: u8 = 1;

/// Ledger handle over one LMDB environment. Implements both
/// [`VoteLedger`] and [`BallotStore`](commitvote_store::BallotStore).
#[derive(Clone)]
pub struct LmdbLedger {
    pub(crate) env: Arc<Env>,
    pub(crate) records_db: Database<Bytes, Bytes>,
    pub(crate) order_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

pub(crate) fn encode_record(status: VoteStatus, choice: Option<ChoiceTag>) -> [u8; 2] {
    match status {
        VoteStatus::Pending => [STATUS_PENDING, 0],
        VoteStatus::Revealed => [STATUS_REVEALED, choice.map_or(0, ChoiceTag::as_u8)],
    }
}

pub(crate) fn decode_record(bytes: &[u8]) -> Result<(VoteStatus, Option<ChoiceTag>), LmdbError> {
    match bytes {
        [STATUS_PENDING, 0] => Ok((VoteStatus::Pending, None)),
        [STATUS_REVEALED, tag] => {
            let choice = ChoiceTag::try_from(*tag)
                .map_err(|e| LmdbError::Corruption(format!("revealed record: {e}")))?;
            Ok((VoteStatus::Revealed, Some(choice)))
        }
        other => Err(LmdbError::Corruption(format!(
            "unexpected record bytes {:?}",
            other
        ))),
    }
}

impl VoteLedger for LmdbLedger {
    fn put_if_absent(&self, commitment: &Commitment) -> Result<bool, StoreError> {
        let key = commitment.as_bytes().as_slice();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let exists = self
            .records_db
            .get(&wtxn, key)
            .map_err(LmdbError::from)?
            .is_some();
        if exists {
            // Dropping the transaction aborts it.
            return Ok(false);
        }

        let seq = self.order_db.len(&wtxn).map_err(LmdbError::from)?;
        self.order_db
            .put(&mut wtxn, &seq.to_be_bytes(), key)
            .map_err(LmdbError::from)?;
        self.records_db
            .put(&mut wtxn, key, &encode_record(VoteStatus::Pending, None))
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(true)
    }

    fn get_status(&self, commitment: &Commitment) -> Result<Option<VoteStatus>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .records_db
            .get(&rtxn, commitment.as_bytes().as_slice())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode_record(bytes)?.0)),
            None => Ok(None),
        }
    }

    fn mark_revealed(
        &self,
        commitment: &Commitment,
        choice: ChoiceTag,
    ) -> Result<bool, StoreError> {
        let key = commitment.as_bytes().as_slice();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let status = match self.records_db.get(&wtxn, key).map_err(LmdbError::from)? {
            Some(bytes) => decode_record(bytes)?.0,
            None => return Ok(false),
        };
        if status.is_revealed() {
            return Ok(false);
        }

        self.records_db
            .put(
                &mut wtxn,
                key,
                &encode_record(VoteStatus::Revealed, Some(choice)),
            )
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(true)
    }

    fn list_commitments(&self) -> Result<Vec<Commitment>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.order_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_seq, val) = entry.map_err(LmdbError::from)?;
            let commitment = Commitment::from_slice(val)
                .map_err(|e| LmdbError::Corruption(format!("order entry: {e}")))?;
            results.push(commitment);
        }
        Ok(results)
    }

    fn count_revealed_for(&self, choice: ChoiceTag) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.records_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut count = 0u64;
        for entry in iter {
            let (_key, val) = entry.map_err(LmdbError::from)?;
            if decode_record(val)? == (VoteStatus::Revealed, Some(choice)) {
                count += 1;
            }
        }
        Ok(count)
    }

    fn commitment_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.records_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }
}
