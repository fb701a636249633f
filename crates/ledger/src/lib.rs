//! External ledger sync.
//!
//! The spreadsheet is the human-auditable record of physical exit/entry
//! events -- wardens read it directly. This crate owns the partitioning
//! rules (boys/girls spreadsheet, one tab per calendar month), the row
//! layout, and the bottom-up entry matching, behind a [`Ledger`] trait so
//! the scan workflow and its tests do not depend on the Sheets API.

pub mod auth;
pub mod row;
pub mod sheets;
pub mod sink;

pub use row::ExitRecord;
pub use sheets::{SheetsConfig, SheetsLedger};
pub use sink::{Ledger, MemoryLedger};

/// Errors from the ledger layer.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// ENTRY push with no prior open EXIT row for that outpass id.
    #[error("No matching exit record for outpass {0}")]
    NoMatchingExitRecord(hostelgate_core::types::OutpassId),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The spreadsheet API returned a non-2xx status code.
    #[error("Sheets API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Service-account token acquisition failed.
    #[error("Ledger auth failed: {0}")]
    Auth(String),
}
