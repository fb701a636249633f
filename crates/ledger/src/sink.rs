//! The ledger seam: one trait, one production implementation
//! ([`crate::SheetsLedger`]), one in-memory double for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use hostelgate_core::types::{OutpassId, Timestamp};

use crate::row::ExitRecord;
use crate::LedgerError;

/// Append-only audit trail of physical exit/entry events.
///
/// Implementations must uphold the entry rule: an entry write without a
/// prior open exit row for that outpass id fails with
/// [`LedgerError::NoMatchingExitRecord`] and writes nothing.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Append one exit row.
    async fn record_exit(&self, record: &ExitRecord) -> Result<(), LedgerError>;

    /// Fill the entry-timestamp cell of the most recent open exit row for
    /// this outpass.
    async fn record_entry(
        &self,
        outpass_id: OutpassId,
        hostel_name: &str,
        entered_at: Timestamp,
    ) -> Result<(), LedgerError>;
}

/// One logical ledger row held by [`MemoryLedger`].
#[derive(Debug, Clone)]
pub struct MemoryRow {
    pub outpass_id: OutpassId,
    pub hostel_name: String,
    pub exited_at: Timestamp,
    pub entered_at: Option<Timestamp>,
    pub operator_id: String,
}

/// In-memory [`Ledger`] used by the API integration tests.
///
/// Mirrors the spreadsheet semantics (bottom-up open-row matching, the
/// no-matching-exit rule) without any upstream calls, and can be armed to
/// fail the next write so saga-abort paths are testable.
#[derive(Default)]
pub struct MemoryLedger {
    rows: Mutex<Vec<MemoryRow>>,
    fail_next: AtomicBool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the ledger to fail its next write with an upstream error.
    pub fn fail_next_write(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Snapshot of all rows, in append order.
    pub fn rows(&self) -> Vec<MemoryRow> {
        self.rows.lock().unwrap().clone()
    }

    fn take_failure(&self) -> Result<(), LedgerError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            Err(LedgerError::Api {
                status: 503,
                body: "injected failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn record_exit(&self, record: &ExitRecord) -> Result<(), LedgerError> {
        self.take_failure()?;
        self.rows.lock().unwrap().push(MemoryRow {
            outpass_id: record.outpass_id,
            hostel_name: record.hostel_name.clone(),
            exited_at: record.exited_at,
            entered_at: None,
            operator_id: record.operator_id.clone(),
        });
        Ok(())
    }

    async fn record_entry(
        &self,
        outpass_id: OutpassId,
        _hostel_name: &str,
        entered_at: Timestamp,
    ) -> Result<(), LedgerError> {
        self.take_failure()?;
        let mut rows = self.rows.lock().unwrap();
        let open = rows
            .iter_mut()
            .rev()
            .find(|row| row.outpass_id == outpass_id && row.entered_at.is_none());
        match open {
            Some(row) => {
                row.entered_at = Some(entered_at);
                Ok(())
            }
            None => Err(LedgerError::NoMatchingExitRecord(outpass_id)),
        }
    }
}
