//! Ledger integrity checks.
//!
//! Run before serving a ledger to detect corruption early: every record must
//! decode, every order entry must point at a record, and both databases must
//! hold the same number of entries.

use commitvote_types::VoteStatus;

use crate::environment::LmdbEnvironment;
use crate::ledger::decode_record;
use crate::LmdbError;

/// Summary of an integrity check run.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub records: u64,
    pub ordered: u64,
    pub pending: u64,
    pub revealed: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check ledger integrity.
///
/// Decoding failures are recorded in the report rather than causing a hard
/// error; only failures to read LMDB at all are returned as `Err`.
pub fn check_integrity(env: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport::default();
    let rtxn = env.env().read_txn()?;

    for entry in env.records_db.iter(&rtxn)? {
        let (key, val) = entry?;
        report.records += 1;
        if key.len() != 32 {
            report
                .errors
                .push(format!("record key has length {}", key.len()));
        }
        match decode_record(val) {
            Ok((VoteStatus::Pending, _)) => report.pending += 1,
            Ok((VoteStatus::Revealed, _)) => report.revealed += 1,
            Err(e) => report.errors.push(e.to_string()),
        }
    }

    for entry in env.order_db.iter(&rtxn)? {
        let (seq, commitment) = entry?;
        report.ordered += 1;
        if env.records_db.get(&rtxn, commitment)?.is_none() {
            report
                .errors
                .push(format!("order entry {} has no record", seq_label(seq)));
        }
    }

    if report.records != report.ordered {
        report.errors.push(format!(
            "{} records but {} order entries",
            report.records, report.ordered
        ));
    }

    if report.is_healthy() {
        tracing::debug!(records = report.records, "ledger integrity check passed");
    } else {
        tracing::warn!(errors = report.errors.len(), "ledger integrity check failed");
    }
    Ok(report)
}

fn seq_label(seq: &[u8]) -> String {
    match <[u8; 8]>::try_from(seq) {
        Ok(arr) => u64::from_be_bytes(arr).to_string(),
        Err(_) => format!("{:?}", seq),
    }
}
