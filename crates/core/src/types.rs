/// Database primary keys are PostgreSQL BIGSERIAL, except outpasses which
/// are keyed by UUID (the id travels inside QR payloads).
pub type DbId = i64;

/// Outpass identifier embedded in QR codes.
pub type OutpassId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
