//! Email-verification code store.
//!
//! An injected dependency held in [`crate::state::AppState`], not a
//! module-level singleton. Codes live in memory with a wall-clock TTL and
//! expired entries are swept lazily on every insert.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Duration;

use hostelgate_core::types::{DbId, Timestamp};

struct PendingCode {
    code: String,
    expires_at: Timestamp,
}

/// Outstanding verification codes keyed by user id. One live code per
/// user; issuing a new one replaces the old.
pub struct VerificationCodes {
    ttl: Duration,
    codes: Mutex<HashMap<DbId, PendingCode>>,
}

impl VerificationCodes {
    pub fn new(ttl_mins: i64) -> Self {
        Self {
            ttl: Duration::minutes(ttl_mins),
            codes: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a fresh six-digit code for a user.
    pub fn issue(&self, user_id: DbId) -> String {
        self.issue_at(user_id, chrono::Utc::now())
    }

    /// Consume a code: returns `true` and forgets the entry iff the code
    /// matches and has not expired.
    pub fn verify(&self, user_id: DbId, code: &str) -> bool {
        self.verify_at(user_id, code, chrono::Utc::now())
    }

    fn issue_at(&self, user_id: DbId, now: Timestamp) -> String {
        use rand::Rng;
        let code = format!("{:06}", rand::rng().random_range(0..1_000_000));

        let mut codes = self.codes.lock().unwrap();
        codes.retain(|_, pending| pending.expires_at > now);
        codes.insert(
            user_id,
            PendingCode {
                code: code.clone(),
                expires_at: now + self.ttl,
            },
        );
        code
    }

    fn verify_at(&self, user_id: DbId, code: &str, now: Timestamp) -> bool {
        let mut codes = self.codes.lock().unwrap();
        match codes.get(&user_id) {
            Some(pending) if pending.expires_at > now && pending.code == code => {
                codes.remove(&user_id);
                true
            }
            _ => false,
        }
    }
}
