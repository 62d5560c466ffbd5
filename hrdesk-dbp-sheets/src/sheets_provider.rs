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

//! Google Sheets implementation of [StoreProvider].

mod sheets_facades;
mod sheets_session;

use self::sheets_facades::SheetsProviderFacades;
use self::sheets_session::SheetsSession;
use crossbeam_skiplist::SkipMap;
use crossbeam_skiplist::SkipSet;
use hrdesk_dbp::bot::EmployeeGist;
use hrdesk_dbp::bot::ProcessedMarker;
use hrdesk_dbp::dbp::StoreProvider;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Titles of the four sheets the provider persists to.
pub struct SheetNames {
    /// Employee directory sheet title.
    directory: String,
    /// HR request log sheet title.
    request: String,
    /// Processed-update marker sheet title.
    processed: String,
    /// Error log sheet title.
    error: String,
}

impl SheetNames {
    /// Return a new instance.
    pub fn new(directory: &str, request: &str, processed: &str, error: &str) -> Self {
        Self {
            directory: directory.to_owned(),
            request: request.to_owned(),
            processed: processed.to_owned(),
            error: error.to_owned(),
        }
    }
}

/** Google Sheets [StoreProvider] implementation.

Each store concern maps to one sheet in a single spreadsheet. Every sheet
keeps its header in row 1 and data rows below it, appended at the bottom.

Processed-update markers are mirrored in memory: warmed from the marker sheet
at startup and maintained on every insert, so the insert-if-absent decision is
made against local state and the sheet is only touched for the append and for
retention trimming. The single-winner guarantee therefore holds per process.
Deployments that need it across processes must not run concurrent instances
against the same spreadsheet.
*/
pub struct SheetsProvider {
    /// Connection to the Sheets API.
    session: Arc<SheetsSession>,
    /// Sheet titles from configuration.
    sheet_names: SheetNames,
    /// Retention bound for processed-update markers.
    marker_retention: usize,
    /// Monotonic insert sequence for marker ordering.
    insert_seq: AtomicU64,
    /// Markers by update identifier. The value carries the insert sequence so
    /// concurrent inserters can tell whose insert won.
    markers: SkipMap<i64, (u64, ProcessedMarker)>,
    /// Marker insert order, oldest first. Row-aligned with the marker sheet:
    /// the n:th entry corresponds to the n:th data row.
    marker_order: SkipSet<(u64, i64)>,
    /// Number of data rows currently in the marker sheet.
    marker_sheet_rows: AtomicU64,
    /// Cached employee directory by Telegram user identifier.
    employees: SkipMap<i64, EmployeeGist>,
    /// Time of the last directory refresh in epoch micros. 0 before the
    /// first load.
    employees_refreshed_ts_micros: AtomicU64,
}

impl SheetsProvider {
    /// Return a new instance.
    pub async fn new(
        api_base_url: &str,
        spreadsheet_id: &str,
        credential: &str,
        sheet_names: SheetNames,
        marker_retention: usize,
    ) -> Arc<Self> {
        let session = SheetsSession::connect(api_base_url, spreadsheet_id, credential).await;
        Arc::new(Self {
            session,
            sheet_names,
            marker_retention,
            insert_seq: AtomicU64::default(),
            markers: SkipMap::default(),
            marker_order: SkipSet::default(),
            marker_sheet_rows: AtomicU64::default(),
            employees: SkipMap::default(),
            employees_refreshed_ts_micros: AtomicU64::default(),
        })
        .init()
        .await
    }

    /// Initialize
    async fn init(self: Arc<Self>) -> Arc<Self> {
        self.warm_markers().await;
        self
    }

    /// Get [StoreProvider] instance.
    pub fn as_store_provider(self: &Arc<Self>) -> StoreProvider {
        StoreProvider::new(Arc::new(SheetsProviderFacades::new(self)))
    }

    /// Load all marker rows into the in-memory mirror.
    ///
    /// A failure here is fatal: with an empty mirror every previously
    /// processed update would look fresh again.
    async fn warm_markers(&self) {
        let range = format!("{}!A2:C", self.sheet_names.processed);
        let rows = self
            .session
            .values_get(&range)
            .await
            .map_err(|e| {
                log::info!("Failed to warm processed-update markers: {e}");
            })
            .unwrap();
        for row in &rows {
            let Some(marker) = Self::marker_from_row(row) else {
                log::warn!("Skipping unparsable marker row: {row:?}");
                // The row still occupies a line in the sheet.
                self.marker_order.insert((
                    self.insert_seq.fetch_add(1, Ordering::Relaxed),
                    i64::MIN,
                ));
                continue;
            };
            let update_id = marker.get_update_id();
            let seq = self.insert_seq.fetch_add(1, Ordering::Relaxed);
            // Later rows win, mirroring append order.
            self.markers.insert(update_id, (seq, marker));
            self.marker_order.insert((seq, update_id));
        }
        self.marker_sheet_rows
            .store(rows.len() as u64, Ordering::Relaxed);
        log::info!("Warmed {} processed-update marker rows.", rows.len());
    }

    /// Parse a `update_id, seen_ts_micros, expires_ts_micros` row.
    fn marker_from_row(row: &[String]) -> Option<ProcessedMarker> {
        let update_id = row.first()?.parse::<i64>().ok()?;
        let seen_ts_micros = row.get(1)?.parse::<u64>().ok()?;
        let expires_ts_micros = row.get(2)?.parse::<u64>().ok()?;
        Some(ProcessedMarker::new(
            update_id,
            seen_ts_micros,
            expires_ts_micros.saturating_sub(seen_ts_micros),
        ))
    }
}
