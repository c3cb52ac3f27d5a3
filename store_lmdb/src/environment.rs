//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::ledger::LmdbLedger;
use crate::migration::Migrator;
use crate::LmdbError;

pub(crate) const RECORDS_DB: &str = "records";
pub(crate) const ORDER_DB: &str = "order";
pub(crate) const META_DB: &str = "meta";

/// LMDB's data file inside an environment directory.
pub const DATA_FILE: &str = "data.mdb";

/// Wraps the LMDB environment and all database handles.
///
/// - `records`: commitment → `[status, tag]`
/// - `order`: big-endian insertion sequence → commitment
/// - `meta`: ballot configuration and schema version
pub struct LmdbEnvironment {
    env: Arc<Env>,
    pub(crate) records_db: Database<Bytes, Bytes>,
    pub(crate) order_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    pub const DEFAULT_MAX_DBS: u32 = 8;
    pub const DEFAULT_MAP_SIZE: usize = 64 * 1024 * 1024;

    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory is created if missing, and the schema version is checked
    /// (and stamped on a fresh ledger) before the environment is returned.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        Self::open_in(path, max_dbs, map_size)
    }

    /// Open an environment that must already exist.
    ///
    /// Fails with [`LmdbError::MissingLedger`] when `path` holds no LMDB data
    /// file, and creates nothing on disk in that case.
    pub fn open_existing(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        if !path.join(DATA_FILE).is_file() {
            return Err(LmdbError::MissingLedger(path.to_path_buf()));
        }
        Self::open_in(path, max_dbs, map_size)
    }

    fn open_in(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        // SAFETY: the environment is opened once per path per process and the
        // memory map is never accessed outside heed's transaction API.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let records_db = env.create_database(&mut wtxn, Some(RECORDS_DB))?;
        let order_db = env.create_database(&mut wtxn, Some(ORDER_DB))?;
        let meta_db = env.create_database(&mut wtxn, Some(META_DB))?;
        wtxn.commit()?;

        let environment = Self {
            env: Arc::new(env),
            records_db,
            order_db,
            meta_db,
        };
        Migrator::run(&environment)?;

        tracing::info!(path = %path.display(), "opened LMDB ledger");
        Ok(environment)
    }

    /// Open with the default database count and map size.
    pub fn open_default(path: &Path) -> Result<Self, LmdbError> {
        Self::open(path, Self::DEFAULT_MAX_DBS, Self::DEFAULT_MAP_SIZE)
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// A ledger handle sharing this environment. Cheap to clone.
    pub fn ledger(&self) -> LmdbLedger {
        LmdbLedger {
            env: Arc::clone(&self.env),
            records_db: self.records_db,
            order_db: self.order_db,
            meta_db: self.meta_db,
        }
    }
}
