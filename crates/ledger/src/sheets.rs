//! Google Sheets implementation of the [`Ledger`] trait.
//!
//! Wraps the Sheets v4 REST API (values read/append/update, tab
//! management) using [`reqwest`]. One instance serves both hostel
//! spreadsheets; routing happens per call from the hostel name.

use async_trait::async_trait;
use chrono::Duration;
use serde::Deserialize;

use hostelgate_core::hostel::{classify_hostel, month_tab_name, HostelWing};
use hostelgate_core::types::{OutpassId, Timestamp};

use crate::auth::TokenProvider;
use crate::row::{find_open_exit_row, format_local, ExitRecord, COL_ENTRY_TIME, HEADER};
use crate::sink::Ledger;
use crate::LedgerError;

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Title Google gives the single tab of a freshly created spreadsheet.
const DEFAULT_TAB_TITLE: &str = "Sheet1";

/// Ledger configuration: the two fixed spreadsheet ids plus partitioning
/// and localization knobs.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub boys_spreadsheet_id: String,
    pub girls_spreadsheet_id: String,
    /// Substring identifying girls' hostels (case-insensitive).
    pub girls_marker: String,
    /// Minutes east of UTC used for displayed timestamps and month tabs.
    pub utc_offset_minutes: i32,
}

/// Spreadsheet-backed [`Ledger`].
pub struct SheetsLedger {
    config: SheetsConfig,
    client: reqwest::Client,
    token: TokenProvider,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsLedger {
    pub fn new(config: SheetsConfig, token: TokenProvider) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            token,
        }
    }

    fn spreadsheet_for(&self, hostel_name: &str) -> &str {
        match classify_hostel(hostel_name, &self.config.girls_marker) {
            HostelWing::Girls => &self.config.girls_spreadsheet_id,
            HostelWing::Boys => &self.config.boys_spreadsheet_id,
        }
    }

    /// Month tab for a timestamp, in the configured local calendar.
    fn tab_for(&self, at: Timestamp) -> String {
        month_tab_name(at + Duration::minutes(self.config.utc_offset_minutes as i64))
    }

    /// Make sure the month tab exists: reuse it if present, rename the
    /// default blank tab if the spreadsheet is fresh, insert a new tab
    /// otherwise.
    async fn ensure_tab(&self, spreadsheet_id: &str, tab: &str) -> Result<(), LedgerError> {
        let token = self.token.bearer_token().await?;
        let response = self
            .client
            .get(format!(
                "{BASE_URL}/{spreadsheet_id}?fields=sheets.properties(sheetId,title)"
            ))
            .bearer_auth(&token)
            .send()
            .await?;
        let meta: SpreadsheetMeta = Self::parse_response(response).await?;

        if meta.sheets.iter().any(|s| s.properties.title == tab) {
            return Ok(());
        }

        let request = match meta.sheets.as_slice() {
            [only] if only.properties.title == DEFAULT_TAB_TITLE => {
                tracing::info!(tab, "Renaming default tab to month tab");
                serde_json::json!({
                    "updateSheetProperties": {
                        "properties": { "sheetId": only.properties.sheet_id, "title": tab },
                        "fields": "title",
                    }
                })
            }
            _ => {
                tracing::info!(tab, "Inserting month tab");
                serde_json::json!({
                    "addSheet": { "properties": { "title": tab } }
                })
            }
        };

        let response = self
            .client
            .post(format!("{BASE_URL}/{spreadsheet_id}:batchUpdate"))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "requests": [request] }))
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Read every populated row of a tab.
    async fn read_tab(
        &self,
        spreadsheet_id: &str,
        tab: &str,
    ) -> Result<Vec<Vec<String>>, LedgerError> {
        let token = self.token.bearer_token().await?;
        let response = self
            .client
            .get(format!("{BASE_URL}/{spreadsheet_id}/values/{tab}"))
            .bearer_auth(&token)
            .send()
            .await?;
        let range: ValueRange = Self::parse_response(response).await?;
        Ok(range.values)
    }

    async fn append_row(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        row: &[String],
    ) -> Result<(), LedgerError> {
        let token = self.token.bearer_token().await?;
        let response = self
            .client
            .post(format!(
                "{BASE_URL}/{spreadsheet_id}/values/{tab}:append?valueInputOption=USER_ENTERED"
            ))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "values": [row] }))
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Overwrite a single cell, addressed by zero-based row/column.
    async fn update_cell(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        row_index: usize,
        col_index: usize,
        value: &str,
    ) -> Result<(), LedgerError> {
        let cell = format!(
            "{}{}",
            char::from(b'A' + col_index as u8),
            row_index + 1
        );
        let token = self.token.bearer_token().await?;
        let response = self
            .client
            .put(format!(
                "{BASE_URL}/{spreadsheet_id}/values/{tab}!{cell}?valueInputOption=USER_ENTERED"
            ))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "values": [[value]] }))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, LedgerError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(LedgerError::Api { status, body })
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<(), LedgerError> {
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(LedgerError::Api { status, body })
        }
    }
}

#[async_trait]
impl Ledger for SheetsLedger {
    async fn record_exit(&self, record: &ExitRecord) -> Result<(), LedgerError> {
        let spreadsheet_id = self.spreadsheet_for(&record.hostel_name);
        let tab = self.tab_for(record.exited_at);
        self.ensure_tab(spreadsheet_id, &tab).await?;

        let rows = self.read_tab(spreadsheet_id, &tab).await?;
        if rows.is_empty() {
            let header: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();
            self.append_row(spreadsheet_id, &tab, &header).await?;
        }

        // Sequence number: one past the current data-row count. The header
        // occupies the first populated row.
        let seq = rows.len().max(1);
        let row = record.to_row(seq, self.config.utc_offset_minutes);
        self.append_row(spreadsheet_id, &tab, &row).await?;

        tracing::info!(
            outpass_id = %record.outpass_id,
            tab,
            seq,
            "Ledger exit row appended"
        );
        Ok(())
    }

    async fn record_entry(
        &self,
        outpass_id: OutpassId,
        hostel_name: &str,
        entered_at: Timestamp,
    ) -> Result<(), LedgerError> {
        let spreadsheet_id = self.spreadsheet_for(hostel_name);
        let tab = self.tab_for(entered_at);
        self.ensure_tab(spreadsheet_id, &tab).await?;

        let rows = self.read_tab(spreadsheet_id, &tab).await?;
        let row_index = find_open_exit_row(&rows, outpass_id)
            .ok_or(LedgerError::NoMatchingExitRecord(outpass_id))?;

        let stamp = format_local(entered_at, self.config.utc_offset_minutes);
        self.update_cell(spreadsheet_id, &tab, row_index, COL_ENTRY_TIME, &stamp)
            .await?;

        tracing::info!(
            outpass_id = %outpass_id,
            tab,
            row = row_index + 1,
            "Ledger entry timestamp recorded"
        );
        Ok(())
    }
}
