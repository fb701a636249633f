//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Request/filter DTOs where the handlers need them
//!
//! Wire serialization is camelCase throughout (the web clients and the QR
//! payload share that convention).

pub mod complaint;
pub mod fee;
pub mod lost_found;
pub mod mess_menu;
pub mod message;
pub mod outpass;
pub mod reconciliation;
pub mod user;
