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

//! Ephemeral in-memory implementation of [IdempotencyFacade].

use super::InMemoryStoreProvider;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::bot::ProcessedMarker;
use hrdesk_dbp::dbp::facades::IdempotencyFacade;
use std::sync::Arc;
use std::sync::atomic::Ordering;

/// Ephemeral in-memory implementation of [IdempotencyFacade].
pub struct InMemIdempotencyFacade {
    inmem_provider: Arc<InMemoryStoreProvider>,
}

impl InMemIdempotencyFacade {
    /// Return a new instance.
    pub fn new(inmem_provider: &Arc<InMemoryStoreProvider>) -> Self {
        Self {
            inmem_provider: Arc::clone(inmem_provider),
        }
    }

    /// Drop oldest markers until the retention bound holds again.
    fn trim_to_retention(&self) {
        let provider = &self.inmem_provider;
        while provider.markers.len() > provider.marker_retention {
            if let Some(oldest) = provider.marker_order.pop_front() {
                let (_seq, update_id) = *oldest.value();
                provider.markers.remove(&update_id);
            } else {
                break;
            }
        }
    }
}

#[async_trait::async_trait]
impl IdempotencyFacade for InMemIdempotencyFacade {
    async fn marker_insert_if_absent(
        &self,
        update_id: i64,
        now_micros: u64,
        ttl_micros: u64,
    ) -> Result<bool, BotError> {
        let provider = &self.inmem_provider;
        loop {
            if let Some(entry) = provider.markers.get(&update_id) {
                let (seq, marker) = entry.value();
                if !marker.is_expired_at(now_micros) {
                    return Ok(false);
                }
                // Expired markers count as absent. Retry the insert after
                // clearing the stale entry.
                provider.marker_order.remove(&(*seq, update_id));
                entry.remove();
            }
            let seq = provider.insert_seq.fetch_add(1, Ordering::Relaxed);
            let winner_seq = provider
                .markers
                .get_or_insert_with(update_id, || {
                    (seq, ProcessedMarker::new(update_id, now_micros, ttl_micros))
                })
                .value()
                .0;
            if winner_seq == seq {
                provider.marker_order.insert((seq, update_id));
                self.trim_to_retention();
                return Ok(true);
            }
            // A concurrent inserter won. Loop to check whether its marker is
            // live or already expired.
        }
    }

    async fn marker_exists(&self, update_id: i64, now_micros: u64) -> Result<bool, BotError> {
        Ok(self
            .inmem_provider
            .markers
            .get(&update_id)
            .is_some_and(|entry| !entry.value().1.is_expired_at(now_micros)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn facade_with_retention(retention: usize) -> InMemIdempotencyFacade {
        let provider = InMemoryStoreProvider::new(retention).await;
        InMemIdempotencyFacade::new(&provider)
    }

    #[tokio::test]
    async fn insert_then_duplicate() {
        let facade = facade_with_retention(1000).await;
        assert!(!facade.marker_exists(42, 1_000).await.unwrap());
        assert!(facade.marker_insert_if_absent(42, 1_000, 60_000_000).await.unwrap());
        assert!(facade.marker_exists(42, 1_000).await.unwrap());
        assert!(!facade.marker_insert_if_absent(42, 2_000, 60_000_000).await.unwrap());
    }

    #[tokio::test]
    async fn expired_marker_counts_as_absent() {
        let facade = facade_with_retention(1000).await;
        assert!(facade.marker_insert_if_absent(7, 1_000, 500).await.unwrap());
        assert!(!facade.marker_exists(7, 1_500).await.unwrap());
        assert!(facade.marker_insert_if_absent(7, 1_500, 500).await.unwrap());
    }

    #[tokio::test]
    async fn retention_bound_evicts_oldest_first() {
        let facade = facade_with_retention(1000).await;
        for update_id in 0..1001i64 {
            assert!(
                facade
                    .marker_insert_if_absent(update_id, 1_000 + update_id as u64, 60_000_000)
                    .await
                    .unwrap()
            );
        }
        assert_eq!(facade.inmem_provider.marker_count(), 1000);
        // The very first marker is the one that was trimmed.
        assert!(!facade.marker_exists(0, 2_000).await.unwrap());
        assert!(facade.marker_exists(1, 2_000).await.unwrap());
        assert!(facade.marker_exists(1000, 2_000).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_insert_has_a_single_winner() {
        let provider = InMemoryStoreProvider::new(1000).await;
        let mut join_handles = Vec::new();
        for _ in 0..8 {
            let provider = Arc::clone(&provider);
            join_handles.push(tokio::spawn(async move {
                InMemIdempotencyFacade::new(&provider)
                    .marker_insert_if_absent(42, 1_000, 60_000_000)
                    .await
                    .unwrap()
            }));
        }
        let mut winners = 0;
        for join_handle in join_handles {
            if join_handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
