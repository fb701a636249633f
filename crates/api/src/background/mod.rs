//! Long-running background jobs spawned at startup.

pub mod reconciliation;
