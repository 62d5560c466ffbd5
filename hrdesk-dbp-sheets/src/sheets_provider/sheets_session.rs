/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! Session (connection) to the Google Sheets API.

use crossbeam_skiplist::SkipMap;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::bot::BotErrorKind;
use reqwest::Client;
use reqwest::ClientBuilder;
use reqwest::Response;
use serde::Deserialize;
use std::sync::Arc;

/// Response body of a spreadsheet metadata fetch, reduced to sheet titles and
/// identifiers.
#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetMetadata>,
}

#[derive(Debug, Deserialize)]
struct SheetMetadata {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId")]
    sheet_id: i64,
    title: String,
}

/// Response body of a values range read.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/** Session (connection) to the Google Sheets API.

Holds the HTTP client, the bearer credential and the sheet title to sheet
identifier mapping discovered from spreadsheet metadata at connect time. Row
deletion needs the numeric sheet identifier, everything else addresses sheets
by title.
*/
pub struct SheetsSession {
    // Client uses an Arc internally, so it doesn't need Arc<> wrapping here
    client: Client,
    spreadsheet_url: String,
    credential: String,
    /// Sheet title to numeric sheet identifier.
    sheet_ids: SkipMap<String, i64>,
}

impl SheetsSession {
    /// Open a session and discover the sheet identifiers of the spreadsheet.
    ///
    /// Connect failures are fatal: without spreadsheet metadata the provider
    /// cannot trim rows, and a misconfigured credential should stop startup.
    pub async fn connect(api_base_url: &str, spreadsheet_id: &str, credential: &str) -> Arc<Self> {
        let client = ClientBuilder::new()
            .referer(false)
            .brotli(true)
            .timeout(core::time::Duration::from_secs(10))
            .build()
            .unwrap();
        let session = Arc::new(Self {
            client,
            spreadsheet_url: format!("{api_base_url}/v4/spreadsheets/{spreadsheet_id}"),
            credential: credential.to_owned(),
            sheet_ids: SkipMap::default(),
        });
        session
            .discover_sheet_ids()
            .await
            .map_err(|e| {
                log::info!("Failed to fetch spreadsheet metadata: {e}");
            })
            .unwrap();
        session
    }

    /// Fetch spreadsheet metadata and populate the title to identifier map.
    async fn discover_sheet_ids(&self) -> Result<(), BotError> {
        let url = format!("{}?fields=sheets.properties", self.spreadsheet_url);
        let response = self.invoke(self.client.get(&url)).await?;
        let metadata = response
            .json::<SpreadsheetMetadata>()
            .await
            .map_err(Self::store_error)?;
        for sheet in metadata.sheets {
            if log::log_enabled!(log::Level::Debug) {
                log::debug!(
                    "Found sheet '{}' with id {}.",
                    sheet.properties.title,
                    sheet.properties.sheet_id
                );
            }
            self.sheet_ids
                .insert(sheet.properties.title, sheet.properties.sheet_id);
        }
        Ok(())
    }

    /// Return the numeric sheet identifier for a sheet title.
    pub fn sheet_id_by_title(&self, title: &str) -> Option<i64> {
        self.sheet_ids.get(title).map(|entry| *entry.value())
    }

    /// Append one row at the bottom of the named sheet.
    pub async fn values_append(&self, sheet_title: &str, row: &[String]) -> Result<(), BotError> {
        let url = format!(
            "{}/values/{sheet_title}:append?valueInputOption=RAW",
            self.spreadsheet_url
        );
        let body = serde_json::json!({ "values": [row] });
        self.invoke(self.client.post(&url).json(&body)).await?;
        Ok(())
    }

    /// Read a range of cells as strings. Numeric cells are rendered in their
    /// JSON form.
    pub async fn values_get(&self, range: &str) -> Result<Vec<Vec<String>>, BotError> {
        let url = format!("{}/values/{range}", self.spreadsheet_url);
        let response = self.invoke(self.client.get(&url)).await?;
        let value_range = response
            .json::<ValueRange>()
            .await
            .map_err(Self::store_error)?;
        Ok(value_range
            .values
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        cell.as_str()
                            .map(str::to_owned)
                            .unwrap_or_else(|| cell.to_string())
                    })
                    .collect()
            })
            .collect())
    }

    /// Delete the row range `[start_index, end_index)` (0-based) from the
    /// named sheet.
    ///
    /// The header row is off limits: a start index below 1 is clamped.
    pub async fn delete_rows(
        &self,
        sheet_title: &str,
        start_index: usize,
        end_index: usize,
    ) -> Result<(), BotError> {
        let sheet_id = self.sheet_id_by_title(sheet_title).ok_or_else(|| {
            BotErrorKind::StoreUnavailable
                .error_with_msg(format!("no sheet with title '{sheet_title}'"))
        })?;
        let Some((start_index, end_index)) = Self::row_deletion_range(start_index, end_index)
        else {
            return Ok(());
        };
        let url = format!("{}:batchUpdate", self.spreadsheet_url);
        let body = serde_json::json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": start_index,
                        "endIndex": end_index,
                    }
                }
            }]
        });
        self.invoke(self.client.post(&url).json(&body)).await?;
        Ok(())
    }

    /// Clamp a requested row range to the deletable part of a sheet.
    ///
    /// Row 0 is the header row and is never part of the returned range.
    /// Returns `None` when nothing is left to delete after clamping.
    fn row_deletion_range(start_index: usize, end_index: usize) -> Option<(usize, usize)> {
        let start_index = start_index.max(1);
        if end_index <= start_index {
            return None;
        }
        Some((start_index, end_index))
    }

    /// Send an authorized request and map every failure mode to a store
    /// error.
    async fn invoke(&self, request: reqwest::RequestBuilder) -> Result<Response, BotError> {
        let response = request
            .bearer_auth(&self.credential)
            .send()
            .await
            .map_err(Self::store_error)?;
        let status_code = response.status();
        if !status_code.is_success() {
            return Err(BotErrorKind::StoreUnavailable
                .error_with_msg(format!("Sheets API returned status {status_code}")));
        }
        Ok(response)
    }

    /// The credential never appears in the URL, but strip URLs from errors
    /// anyway since they embed the spreadsheet identifier.
    fn store_error(e: reqwest::Error) -> BotError {
        BotErrorKind::StoreUnavailable.error_with_msg(format!("{:?}", e.without_url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_range_never_includes_the_header_row() {
        assert_eq!(SheetsSession::row_deletion_range(0, 3), Some((1, 3)));
        assert_eq!(SheetsSession::row_deletion_range(2, 5), Some((2, 5)));
    }

    #[test]
    fn empty_deletion_range_is_a_noop() {
        // Nothing but the header in range.
        assert_eq!(SheetsSession::row_deletion_range(0, 0), None);
        assert_eq!(SheetsSession::row_deletion_range(0, 1), None);
        // Empty and inverted ranges.
        assert_eq!(SheetsSession::row_deletion_range(1, 1), None);
        assert_eq!(SheetsSession::row_deletion_range(4, 2), None);
    }
}
