//! LMDB implementation of BallotStore.

use commitvote_store::{BallotStore, StoreError};
use commitvote_types::BallotConfig;

use crate::ledger::LmdbLedger;
use crate::LmdbError;

pub(crate) const BALLOT_KEY: &[u8] = b"ballot";

impl BallotStore for LmdbLedger {
    fn put_ballot(&self, config: &BallotConfig) -> Result<(), StoreError> {
        let bytes = bincode::serialize(config).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let exists = self
            .meta_db
            .get(&wtxn, BALLOT_KEY)
            .map_err(LmdbError::from)?
            .is_some();
        if exists {
            return Err(StoreError::Duplicate("ballot".into()));
        }
        self.meta_db
            .put(&mut wtxn, BALLOT_KEY, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_ballot(&self) -> Result<Option<BallotConfig>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self.meta_db.get(&rtxn, BALLOT_KEY).map_err(LmdbError::from)? {
            Some(bytes) => {
                let config: BallotConfig = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(config))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LmdbEnvironment;
    use commitvote_types::{Choices, CommitmentScheme};

    #[test]
    fn ballot_round_trips_and_is_write_once() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), 8, 1 << 20).unwrap();
        let ledger = env.ledger();
        assert_eq!(ledger.get_ballot().unwrap(), None);

        let config = BallotConfig::new(
            Choices::new("tabs", "spaces").unwrap(),
            CommitmentScheme::Blake2bV1,
        );
        ledger.put_ballot(&config).unwrap();
        assert_eq!(ledger.get_ballot().unwrap(), Some(config.clone()));

        let other = BallotConfig::new(
            Choices::new("a", "b").unwrap(),
            CommitmentScheme::Keccak256,
        );
        assert!(matches!(
            ledger.put_ballot(&other),
            Err(StoreError::Duplicate(_))
        ));
        assert_eq!(ledger.get_ballot().unwrap(), Some(config));
    }

    #[test]
    fn undecodable_ballot_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), 8, 1 << 20).unwrap();
        {
            let mut wtxn = env.env().write_txn().unwrap();
            env.meta_db.put(&mut wtxn, BALLOT_KEY, &[0xff]).unwrap();
            wtxn.commit().unwrap();
        }
        assert!(matches!(
            env.ledger().get_ballot(),
            Err(StoreError::Serialization(_))
        ));
    }
}
