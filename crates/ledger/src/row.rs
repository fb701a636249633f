//! Ledger row layout and matching rules.
//!
//! A sheet tab is a header row followed by one data row per physical exit.
//! The entry timestamp cell starts empty and is filled in place when the
//! student returns.

use chrono::FixedOffset;

use hostelgate_core::types::{OutpassId, Timestamp};

/// Header row appended to a fresh month tab.
pub const HEADER: &[&str] = &[
    "S.No",
    "Outpass ID",
    "Student ID",
    "Student Name",
    "Hostel",
    "College",
    "Room",
    "Year & Dept",
    "From",
    "To",
    "Reason",
    "Exit Time",
    "Entry Time",
    "Verified By",
];

/// Zero-based column index of the outpass id.
pub const COL_OUTPASS_ID: usize = 1;
/// Zero-based column index of the entry-timestamp cell.
pub const COL_ENTRY_TIME: usize = 12;

/// Everything a ledger EXIT push needs. Assembled by the scan workflow
/// from the authoritative outpass record, never from the QR payload.
#[derive(Debug, Clone)]
pub struct ExitRecord {
    pub outpass_id: OutpassId,
    pub student_id: String,
    pub student_name: String,
    pub hostel_name: String,
    pub college_name: String,
    pub room_number: String,
    pub year_and_dept: String,
    pub reason: String,
    pub from_date: String,
    pub to_date: String,
    pub exited_at: Timestamp,
    /// Id of the send-off operator who scanned the pass.
    pub operator_id: String,
}

impl ExitRecord {
    /// Render the data row for this exit. `seq` is the running sequence
    /// number (current data-row count + 1); `offset_minutes` localizes the
    /// exit timestamp.
    pub fn to_row(&self, seq: usize, offset_minutes: i32) -> Vec<String> {
        vec![
            seq.to_string(),
            self.outpass_id.to_string(),
            self.student_id.clone(),
            self.student_name.clone(),
            self.hostel_name.clone(),
            self.college_name.clone(),
            self.room_number.clone(),
            self.year_and_dept.clone(),
            self.from_date.clone(),
            self.to_date.clone(),
            self.reason.clone(),
            format_local(self.exited_at, offset_minutes),
            String::new(),
            self.operator_id.clone(),
        ]
    }
}

/// Render a timestamp in the ledger's local display format.
pub fn format_local(at: Timestamp, offset_minutes: i32) -> String {
    let offset =
        FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
    at.with_timezone(&offset).format("%d/%m/%Y %H:%M:%S").to_string()
}

/// Find the most recent open exit row for `outpass_id`: scan data rows
/// bottom-up for a matching id with an empty entry-timestamp cell.
///
/// Returns the zero-based index into `rows` (header included), so the
/// caller can address the sheet cell directly. Rows too short to hold an
/// entry cell are treated as open -- a row appended without trailing blanks
/// is still an exit awaiting return.
pub fn find_open_exit_row(rows: &[Vec<String>], outpass_id: OutpassId) -> Option<usize> {
    let id = outpass_id.to_string();
    rows.iter()
        .enumerate()
        .skip(1) // header
        .rev()
        .find(|(_, row)| {
            row.get(COL_OUTPASS_ID).map(String::as_str) == Some(id.as_str())
                && row.get(COL_ENTRY_TIME).map_or(true, |cell| cell.trim().is_empty())
        })
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn record(id: Uuid) -> ExitRecord {
        ExitRecord {
            outpass_id: id,
            student_id: "2021cs042".into(),
            student_name: "Asha Rao".into(),
            hostel_name: "Kaveri Hostel".into(),
            college_name: "NIT Surathkal".into(),
            room_number: "B-214".into(),
            year_and_dept: "3rd Year CSE".into(),
            reason: "home visit".into(),
            from_date: "2024-01-10".into(),
            to_date: "2024-01-12".into(),
            exited_at: Utc.with_ymd_and_hms(2024, 1, 10, 3, 30, 0).unwrap(),
            operator_id: "gate01".into(),
        }
    }

    fn data_row(id: Uuid, entry_cell: &str) -> Vec<String> {
        let mut row = record(id).to_row(1, 330);
        row[COL_ENTRY_TIME] = entry_cell.to_string();
        row
    }

    #[test]
    fn test_row_matches_header_width() {
        let row = record(Uuid::nil()).to_row(1, 330);
        assert_eq!(row.len(), HEADER.len());
        assert_eq!(row[COL_OUTPASS_ID], Uuid::nil().to_string());
        assert!(row[COL_ENTRY_TIME].is_empty());
    }

    #[test]
    fn test_exit_time_is_localized() {
        // 03:30 UTC at +05:30 is 09:00 local.
        let row = record(Uuid::nil()).to_row(1, 330);
        assert_eq!(row[11], "10/01/2024 09:00:00");
    }

    #[test]
    fn test_bottom_up_match_picks_most_recent_open_row() {
        let id = Uuid::new_v4();
        let rows = vec![
            HEADER.iter().map(|s| s.to_string()).collect(),
            data_row(id, "11/01/2024 18:00:00"), // earlier trip, closed
            data_row(Uuid::new_v4(), ""),        // someone else
            data_row(id, ""),                    // this trip, open
        ];
        assert_eq!(find_open_exit_row(&rows, id), Some(3));
    }

    #[test]
    fn test_closed_rows_do_not_match() {
        let id = Uuid::new_v4();
        let rows = vec![
            HEADER.iter().map(|s| s.to_string()).collect(),
            data_row(id, "11/01/2024 18:00:00"),
        ];
        assert_eq!(find_open_exit_row(&rows, id), None);
    }

    #[test]
    fn test_header_never_matches() {
        let rows: Vec<Vec<String>> = vec![HEADER.iter().map(|s| s.to_string()).collect()];
        assert_eq!(find_open_exit_row(&rows, Uuid::nil()), None);
    }

    #[test]
    fn test_short_row_counts_as_open() {
        let id = Uuid::new_v4();
        let mut short = data_row(id, "");
        short.truncate(COL_ENTRY_TIME); // appended without trailing blanks
        let rows = vec![HEADER.iter().map(|s| s.to_string()).collect(), short];
        assert_eq!(find_open_exit_row(&rows, id), Some(1));
    }
}
