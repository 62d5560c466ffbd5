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

//! Google Sheets implementation of [IdempotencyFacade].

use super::SheetsProvider;
use crossbeam_skiplist::SkipMap;
use crossbeam_skiplist::SkipSet;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::bot::ProcessedMarker;
use hrdesk_dbp::dbp::facades::IdempotencyFacade;
use std::sync::Arc;
use std::sync::atomic::Ordering;

/** Google Sheets implementation of [IdempotencyFacade].

The insert-if-absent decision is made against the warmed in-memory mirror.
The winning insert appends a `update_id, seen_ts_micros, expires_ts_micros`
row to the marker sheet before the claim is confirmed: if the append fails
the local claim is rolled back and the error propagates, so the caller fails
closed.

Retention is enforced against the sheet: when the data row count exceeds the
bound, the oldest rows are deleted from the top (the header row is never
touched) and the corresponding mirror entries are dropped.
*/
pub struct SheetsIdempotencyFacade {
    sheets_provider: Arc<SheetsProvider>,
}

impl SheetsIdempotencyFacade {
    /// Return a new instance.
    pub fn new(sheets_provider: &Arc<SheetsProvider>) -> Self {
        Self {
            sheets_provider: Arc::clone(sheets_provider),
        }
    }

    /// Delete oldest marker rows until the retention bound holds again.
    ///
    /// Best effort: a failed delete is retried on the next insert.
    async fn trim_to_retention(&self) {
        let provider = &self.sheets_provider;
        let rows = provider.marker_sheet_rows.load(Ordering::Relaxed);
        let overflow = Self::retention_overflow(rows, provider.marker_retention);
        if overflow == 0 {
            return;
        }
        if let Err(e) = provider
            .session
            .delete_rows(&provider.sheet_names.processed, 1, 1 + overflow)
            .await
        {
            log::warn!("Failed to trim {overflow} marker rows: {e}");
            return;
        }
        provider
            .marker_sheet_rows
            .fetch_sub(overflow as u64, Ordering::Relaxed);
        Self::drop_oldest_mirror_entries(&provider.markers, &provider.marker_order, overflow);
    }

    /// Number of data rows above the retention bound.
    fn retention_overflow(rows: u64, retention: usize) -> usize {
        rows.saturating_sub(retention as u64) as usize
    }

    /// Drop the `overflow` oldest insert-order entries and their markers from
    /// the mirror. Order entries are row-aligned with the sheet, so this
    /// mirrors a top-row deletion.
    fn drop_oldest_mirror_entries(
        markers: &SkipMap<i64, (u64, ProcessedMarker)>,
        marker_order: &SkipSet<(u64, i64)>,
        overflow: usize,
    ) {
        for _ in 0..overflow {
            let Some(oldest) = marker_order.pop_front() else {
                break;
            };
            let (seq, update_id) = *oldest.value();
            if let Some(entry) = markers.get(&update_id) {
                // Only drop the marker if this order entry is not stale.
                if entry.value().0 == seq {
                    entry.remove();
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl IdempotencyFacade for SheetsIdempotencyFacade {
    async fn marker_insert_if_absent(
        &self,
        update_id: i64,
        now_micros: u64,
        ttl_micros: u64,
    ) -> Result<bool, BotError> {
        let provider = &self.sheets_provider;
        loop {
            if let Some(entry) = provider.markers.get(&update_id) {
                if !entry.value().1.is_expired_at(now_micros) {
                    return Ok(false);
                }
                // Expired markers count as absent. The stale order entry and
                // sheet row stay behind until retention trims them.
                entry.remove();
            }
            let seq = provider.insert_seq.fetch_add(1, Ordering::Relaxed);
            let marker = ProcessedMarker::new(update_id, now_micros, ttl_micros);
            let winner_seq = provider
                .markers
                .get_or_insert_with(update_id, || (seq, marker.clone()))
                .value()
                .0;
            if winner_seq != seq {
                // A concurrent inserter won. Loop to check whether its marker
                // is live or already expired.
                continue;
            }
            let row = [
                update_id.to_string(),
                now_micros.to_string(),
                marker.get_expires_ts_micros().to_string(),
            ];
            if let Err(e) = provider
                .session
                .values_append(&provider.sheet_names.processed, &row)
                .await
            {
                // Roll the local claim back so a redelivery can try again.
                provider.markers.remove(&update_id);
                return Err(e);
            }
            provider.marker_order.insert((seq, update_id));
            provider.marker_sheet_rows.fetch_add(1, Ordering::Relaxed);
            self.trim_to_retention().await;
            return Ok(true);
        }
    }

    async fn marker_exists(&self, update_id: i64, now_micros: u64) -> Result<bool, BotError> {
        Ok(self
            .sheets_provider
            .markers
            .get(&update_id)
            .is_some_and(|entry| !entry.value().1.is_expired_at(now_micros)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirror_with_markers(
        entries: &[(u64, i64)],
    ) -> (SkipMap<i64, (u64, ProcessedMarker)>, SkipSet<(u64, i64)>) {
        let markers = SkipMap::default();
        let marker_order = SkipSet::default();
        for &(seq, update_id) in entries {
            if update_id != i64::MIN {
                markers.insert(update_id, (seq, ProcessedMarker::new(update_id, 1_000, 1_000)));
            }
            marker_order.insert((seq, update_id));
        }
        (markers, marker_order)
    }

    #[test]
    fn no_overflow_at_or_below_the_retention_bound() {
        // Empty sheet.
        assert_eq!(SheetsIdempotencyFacade::retention_overflow(0, 1000), 0);
        // Exactly at the bound.
        assert_eq!(SheetsIdempotencyFacade::retention_overflow(1000, 1000), 0);
        assert_eq!(SheetsIdempotencyFacade::retention_overflow(1001, 1000), 1);
        assert_eq!(SheetsIdempotencyFacade::retention_overflow(1005, 1000), 5);
    }

    #[test]
    fn trimming_drops_the_oldest_markers_first() {
        let (markers, marker_order) = mirror_with_markers(&[(0, 10), (1, 11), (2, 12)]);
        SheetsIdempotencyFacade::drop_oldest_mirror_entries(&markers, &marker_order, 2);
        assert!(markers.get(&10).is_none());
        assert!(markers.get(&11).is_none());
        assert!(markers.get(&12).is_some());
        assert_eq!(marker_order.len(), 1);
    }

    #[test]
    fn trimming_skips_placeholder_rows_from_unparsable_lines() {
        // Sequence 1 is a placeholder for a sheet row that failed to parse at
        // warm-up. It occupies a row, but has no marker to drop.
        let (markers, marker_order) = mirror_with_markers(&[(0, 10), (1, i64::MIN), (2, 12)]);
        SheetsIdempotencyFacade::drop_oldest_mirror_entries(&markers, &marker_order, 2);
        assert!(markers.get(&10).is_none());
        assert!(markers.get(&12).is_some());
        assert_eq!(marker_order.len(), 1);
    }

    #[test]
    fn stale_order_entry_never_drops_a_reclaimed_marker() {
        let (markers, marker_order) = mirror_with_markers(&[(0, 10)]);
        // The original marker expired and update 10 was claimed again with a
        // newer sequence. The old order entry is now stale.
        markers.insert(10, (7, ProcessedMarker::new(10, 2_000, 1_000)));
        SheetsIdempotencyFacade::drop_oldest_mirror_entries(&markers, &marker_order, 1);
        assert_eq!(markers.get(&10).map(|entry| entry.value().0), Some(7));
        assert!(marker_order.is_empty());
    }
}
