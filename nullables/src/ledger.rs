//! Nullable ledger: thread-safe in-memory ledger for testing.

use commitvote_store::{BallotStore, StoreError, VoteLedger};
use commitvote_types::{BallotConfig, ChoiceTag, Commitment, VoteRecord, VoteStatus};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    records: HashMap<Commitment, VoteRecord>,
    order: Vec<Commitment>,
    ballot: Option<BallotConfig>,
}

/// An in-memory vote ledger + ballot store for testing.
///
/// All state sits behind one mutex, so every trait method is atomic with
/// respect to the others, matching the contract of an authoritative ledger.
pub struct NullLedger {
    inner: Mutex<Inner>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_attempts: AtomicU64,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            write_attempts: AtomicU64::new(0),
        }
    }

    /// A ledger that already holds `config`, as if a ballot had been created on it.
    pub fn with_ballot(config: BallotConfig) -> Self {
        let ledger = Self::new();
        if let Ok(mut inner) = ledger.inner.lock() {
            inner.ballot = Some(config);
        }
        ledger
    }

    /// Make every subsequent read fail with a backend error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with a backend error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of write operations attempted so far, including failed ones.
    pub fn write_attempts(&self) -> u64 {
        self.write_attempts.load(Ordering::SeqCst)
    }

    /// Inspect the stored record for `commitment`.
    pub fn record(&self, commitment: &Commitment) -> Option<VoteRecord> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.records.get(commitment).cloned())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("null ledger mutex poisoned".into()))
    }

    fn read(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected read failure".into()));
        }
        self.lock()
    }

    fn write(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".into()));
        }
        self.lock()
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl VoteLedger for NullLedger {
    fn put_if_absent(&self, commitment: &Commitment) -> Result<bool, StoreError> {
        let mut inner = self.write()?;
        if inner.records.contains_key(commitment) {
            return Ok(false);
        }
        inner
            .records
            .insert(*commitment, VoteRecord::pending(*commitment));
        inner.order.push(*commitment);
        Ok(true)
    }

    fn get_status(&self, commitment: &Commitment) -> Result<Option<VoteStatus>, StoreError> {
        Ok(self.read()?.records.get(commitment).map(|r| r.status))
    }

    fn mark_revealed(
        &self,
        commitment: &Commitment,
        choice: ChoiceTag,
    ) -> Result<bool, StoreError> {
        let mut inner = self.write()?;
        Ok(inner
            .records
            .get_mut(commitment)
            .is_some_and(|record| record.reveal(choice)))
    }

    fn list_commitments(&self) -> Result<Vec<Commitment>, StoreError> {
        Ok(self.read()?.order.clone())
    }

    fn count_revealed_for(&self, choice: ChoiceTag) -> Result<u64, StoreError> {
        Ok(self
            .read()?
            .records
            .values()
            .filter(|r| r.counts_for(choice))
            .count() as u64)
    }

    fn commitment_count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.records.len() as u64)
    }
}

impl BallotStore for NullLedger {
    fn put_ballot(&self, config: &BallotConfig) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if inner.ballot.is_some() {
            return Err(StoreError::Duplicate("ballot".into()));
        }
        inner.ballot = Some(config.clone());
        Ok(())
    }

    fn get_ballot(&self) -> Result<Option<BallotConfig>, StoreError> {
        Ok(self.read()?.ballot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitvote_types::{Choices, CommitmentScheme};

    fn c(byte: u8) -> Commitment {
        Commitment::new([byte; 32])
    }

    #[test]
    fn put_if_absent_inserts_once() {
        let ledger = NullLedger::new();
        assert!(ledger.put_if_absent(&c(1)).unwrap());
        assert!(!ledger.put_if_absent(&c(1)).unwrap());
        assert_eq!(ledger.commitment_count().unwrap(), 1);
        assert_eq!(ledger.get_status(&c(1)).unwrap(), Some(VoteStatus::Pending));
    }

    #[test]
    fn list_keeps_insertion_order() {
        let ledger = NullLedger::new();
        for byte in [9, 3, 7] {
            ledger.put_if_absent(&c(byte)).unwrap();
        }
        assert_eq!(ledger.list_commitments().unwrap(), vec![c(9), c(3), c(7)]);
    }

    #[test]
    fn mark_revealed_only_from_pending() {
        let ledger = NullLedger::new();
        assert!(!ledger.mark_revealed(&c(1), ChoiceTag::First).unwrap());

        ledger.put_if_absent(&c(1)).unwrap();
        assert!(ledger.mark_revealed(&c(1), ChoiceTag::First).unwrap());
        assert!(!ledger.mark_revealed(&c(1), ChoiceTag::First).unwrap());
        assert_eq!(ledger.count_revealed_for(ChoiceTag::First).unwrap(), 1);
        assert_eq!(ledger.count_revealed_for(ChoiceTag::Second).unwrap(), 0);
    }

    #[test]
    fn injected_failures_surface_as_backend_errors() {
        let ledger = NullLedger::new();
        ledger.set_fail_writes(true);
        assert!(matches!(
            ledger.put_if_absent(&c(1)),
            Err(StoreError::Backend(_))
        ));
        assert_eq!(ledger.write_attempts(), 1);

        ledger.set_fail_writes(false);
        ledger.set_fail_reads(true);
        assert!(ledger.get_status(&c(1)).is_err());
        assert!(ledger.commitment_count().is_err());
    }

    #[test]
    fn ballot_is_write_once() {
        let ledger = NullLedger::new();
        assert_eq!(ledger.get_ballot().unwrap(), None);

        let config = BallotConfig::new(
            Choices::new("yes", "no").unwrap(),
            CommitmentScheme::Keccak256,
        );
        ledger.put_ballot(&config).unwrap();
        assert!(matches!(
            ledger.put_ballot(&config),
            Err(StoreError::Duplicate(_))
        ));
        assert_eq!(ledger.get_ballot().unwrap(), Some(config));
    }
}
