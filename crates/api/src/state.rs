use std::sync::Arc;

use hostelgate_ledger::Ledger;

use crate::auth::mailer::Mailer;
use crate::auth::verification::VerificationCodes;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). The ledger is a trait object so integration tests can swap
/// the spreadsheet client for an in-memory double.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hostelgate_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// External ledger sink (spreadsheet in production).
    pub ledger: Arc<dyn Ledger>,
    /// Outstanding email-verification codes.
    pub verification_codes: Arc<VerificationCodes>,
    /// Verification-code delivery.
    pub mailer: Arc<Mailer>,
}
