//! Lost-and-found entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hostelgate_core::types::{DbId, Timestamp};

pub const ITEM_LOST: &str = "lost";
pub const ITEM_FOUND: &str = "found";

pub const ITEM_OPEN: &str = "open";
pub const ITEM_CLAIMED: &str = "claimed";

pub fn validate_kind(kind: &str) -> Result<(), String> {
    if kind == ITEM_LOST || kind == ITEM_FOUND {
        Ok(())
    } else {
        Err(format!("Invalid item kind '{kind}'. Must be 'lost' or 'found'"))
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LostFoundItem {
    pub id: DbId,
    pub reporter_id: String,
    pub reporter_name: String,
    pub item_name: String,
    pub description: String,
    pub location: String,
    pub kind: String,
    pub status: String,
    pub hostel_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLostFoundItem {
    pub item_name: String,
    pub description: String,
    pub location: String,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostFoundListParams {
    pub hostel_name: Option<String>,
    pub kind: Option<String>,
}
