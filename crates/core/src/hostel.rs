//! Hostel grouping helpers for ledger partitioning.
//!
//! Physical movement is logged to one of two spreadsheets, selected by a
//! substring match on the hostel name, and within a spreadsheet to one tab
//! per calendar month.

use chrono::{DateTime, Utc};

/// Sex-segregated hostel grouping used to route ledger writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostelWing {
    Boys,
    Girls,
}

/// Default marker substring identifying girls' hostels.
pub const DEFAULT_GIRLS_MARKER: &str = "girls";

/// Classify a hostel name by case-insensitive substring match on `marker`.
///
/// Names without the marker fall through to [`HostelWing::Boys`], matching
/// how the two fixed spreadsheets are assigned.
pub fn classify_hostel(hostel_name: &str, marker: &str) -> HostelWing {
    if hostel_name.to_lowercase().contains(&marker.to_lowercase()) {
        HostelWing::Girls
    } else {
        HostelWing::Boys
    }
}

/// Sheet tab name for the month containing `at`: `"{MonthAbbrev}-{Year}"`,
/// e.g. `"Aug-2026"`.
pub fn month_tab_name(at: DateTime<Utc>) -> String {
    at.format("%b-%Y").to_string()
}
