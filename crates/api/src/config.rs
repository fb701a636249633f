use hostelgate_core::hostel::DEFAULT_GIRLS_MARKER;
use hostelgate_ledger::SheetsConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have sensible defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Shared registration codes gating privileged roles.
    pub role_codes: RoleCodes,
    /// Verification-code lifetime in minutes (default: `10`).
    pub verification_code_ttl_mins: i64,
    /// Reconciliation sweep interval in seconds (default: `60`).
    pub reconciliation_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `HOST`                          | `0.0.0.0`               |
    /// | `PORT`                          | `3000`                  |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                    |
    /// | `VERIFICATION_CODE_TTL_MINS`    | `10`                    |
    /// | `RECONCILIATION_INTERVAL_SECS`  | `60`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let verification_code_ttl_mins: i64 = std::env::var("VERIFICATION_CODE_TTL_MINS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("VERIFICATION_CODE_TTL_MINS must be a valid i64");

        let reconciliation_interval_secs: u64 = std::env::var("RECONCILIATION_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("RECONCILIATION_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            role_codes: RoleCodes::from_env(),
            verification_code_ttl_mins,
            reconciliation_interval_secs,
        }
    }
}

/// Shared secret codes presented at registration to obtain a privileged
/// role. A role whose code is unset cannot be self-registered.
#[derive(Debug, Clone, Default)]
pub struct RoleCodes {
    pub admin: Option<String>,
    pub authority: Option<String>,
    pub send_off: Option<String>,
    pub devops: Option<String>,
}

impl RoleCodes {
    /// Load from `ROLE_CODE_ADMIN`, `ROLE_CODE_AUTHORITY`,
    /// `ROLE_CODE_SEND_OFF`, and `ROLE_CODE_DEVOPS`.
    pub fn from_env() -> Self {
        let read = |var: &str| std::env::var(var).ok().filter(|v| !v.is_empty());
        Self {
            admin: read("ROLE_CODE_ADMIN"),
            authority: read("ROLE_CODE_AUTHORITY"),
            send_off: read("ROLE_CODE_SEND_OFF"),
            devops: read("ROLE_CODE_DEVOPS"),
        }
    }

    /// The configured code for a role, if any. Students need no code.
    pub fn code_for(&self, role: &str) -> Option<&str> {
        match role {
            hostelgate_core::roles::ROLE_ADMIN => self.admin.as_deref(),
            hostelgate_core::roles::ROLE_AUTHORITY => self.authority.as_deref(),
            hostelgate_core::roles::ROLE_SEND_OFF => self.send_off.as_deref(),
            hostelgate_core::roles::ROLE_DEVOPS => self.devops.as_deref(),
            _ => None,
        }
    }
}

/// Load the ledger configuration from environment variables.
///
/// | Env Var                     | Required | Default   |
/// |-----------------------------|----------|-----------|
/// | `LEDGER_BOYS_SPREADSHEET`   | **yes**  | --        |
/// | `LEDGER_GIRLS_SPREADSHEET`  | **yes**  | --        |
/// | `LEDGER_GIRLS_MARKER`       | no       | `girls`   |
/// | `LEDGER_UTC_OFFSET_MINUTES` | no       | `330`     |
///
/// # Panics
///
/// Panics if either spreadsheet id is missing.
pub fn ledger_config_from_env() -> SheetsConfig {
    let boys_spreadsheet_id = std::env::var("LEDGER_BOYS_SPREADSHEET")
        .expect("LEDGER_BOYS_SPREADSHEET must be set in the environment");
    let girls_spreadsheet_id = std::env::var("LEDGER_GIRLS_SPREADSHEET")
        .expect("LEDGER_GIRLS_SPREADSHEET must be set in the environment");

    let girls_marker =
        std::env::var("LEDGER_GIRLS_MARKER").unwrap_or_else(|_| DEFAULT_GIRLS_MARKER.into());

    let utc_offset_minutes: i32 = std::env::var("LEDGER_UTC_OFFSET_MINUTES")
        .unwrap_or_else(|_| "330".into())
        .parse()
        .expect("LEDGER_UTC_OFFSET_MINUTES must be a valid i32");

    SheetsConfig {
        boys_spreadsheet_id,
        girls_spreadsheet_id,
        girls_marker,
        utc_offset_minutes,
    }
}
