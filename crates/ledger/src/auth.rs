//! Service-account authentication for the spreadsheet API.
//!
//! Google's OAuth flow for server-to-server access: sign a short-lived
//! RS256 JWT with the service account's private key, exchange it at the
//! token endpoint for a bearer token, and cache that until shortly before
//! it expires.

use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// OAuth scope granting spreadsheet read/write access.
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Grant type for the signed-JWT exchange.
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime in seconds (the endpoint caps this at one hour).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh the cached token this many seconds before it expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The fields of a service-account key file this crate uses.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Load a key from a JSON key file on disk.
    pub fn from_file(path: &str) -> Result<Self, LedgerError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Auth(format!("Cannot read key file {path}: {e}")))?;
        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Auth(format!("Malformed key file {path}: {e}")))
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    token: String,
    /// Unix timestamp past which the token must not be reused.
    good_until: i64,
}

/// Issues and caches bearer tokens for the spreadsheet API.
pub struct TokenProvider {
    key: ServiceAccountKey,
    client: reqwest::Client,
    cached: tokio::sync::Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(key: ServiceAccountKey, client: reqwest::Client) -> Self {
        Self {
            key,
            client,
            cached: tokio::sync::Mutex::new(None),
        }
    }

    /// Return a bearer token, minting a fresh one if the cache is empty
    /// or about to expire.
    pub async fn bearer_token(&self) -> Result<String, LedgerError> {
        let now = chrono::Utc::now().timestamp();

        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.good_until > now {
                return Ok(token.token.clone());
            }
        }

        let assertion = self.sign_assertion(now)?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Auth(format!(
                "Token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        let good_until = now + token.expires_in - EXPIRY_MARGIN_SECS;
        tracing::debug!(good_until, "Minted spreadsheet API token");

        *cached = Some(CachedToken {
            token: token.access_token.clone(),
            good_until,
        });
        Ok(token.access_token)
    }

    fn sign_assertion(&self, now: i64) -> Result<String, LedgerError> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let key = jsonwebtoken::EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| LedgerError::Auth(format!("Invalid service-account private key: {e}")))?;
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::RS256),
            &claims,
            &key,
        )
        .map_err(|e| LedgerError::Auth(format!("Cannot sign token assertion: {e}")))
    }
}
