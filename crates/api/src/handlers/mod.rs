//! HTTP handler functions, grouped by resource.

pub mod auth;
pub mod complaint;
pub mod fee;
pub mod health;
pub mod lost_found;
pub mod mess;
pub mod message;
pub mod outpass;
pub mod scan;
pub mod users;
