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

//! Duplicate detection gate for incoming updates.

use super::recent_update_cache::RecentUpdateCache;
use hrdesk_client::time;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::dbp::StoreProvider;
use hrdesk_dbp::dbp::facades::StoreProviderFacades;
use std::sync::Arc;

/// Outcome of [UpdateGate::check_and_mark].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// First sighting of the update. Caller owns processing it.
    Fresh,
    /// Already seen (or the store could not be consulted). Caller must drop
    /// the update without processing.
    Duplicate,
}

/** Duplicate detection gate for incoming updates.

The authoritative record of processed update identifiers lives in the
idempotency store, where an atomic insert-if-absent decides a single winner
per update identifier even across concurrent deliveries and multiple
instances. A process-local [RecentUpdateCache] in front of it short-circuits
the common retry-storm case without a store round-trip.

When the store cannot be consulted the gate fails closed: the update is
reported as [GateDecision::Duplicate] and a row is written to the error log.
Dropping a real update is recoverable (Telegram redelivers until
acknowledged by an operator re-run), while double-processing an HR request
is not.
*/
pub struct UpdateGate {
    store_provider: Arc<StoreProvider>,
    recent_updates: Arc<RecentUpdateCache>,
    marker_ttl_micros: u64,
}

impl UpdateGate {
    /// Return a new instance.
    pub fn new(
        store_provider: &Arc<StoreProvider>,
        recent_window: u64,
        marker_ttl_micros: u64,
    ) -> Arc<Self> {
        Arc::new(Self {
            store_provider: Arc::clone(store_provider),
            recent_updates: RecentUpdateCache::new(recent_window),
            marker_ttl_micros,
        })
    }

    /// Return `true` if the update identifier has an unexpired marker, without
    /// claiming it.
    pub async fn is_seen(&self, update_id: i64) -> Result<bool, BotError> {
        if self.recent_updates.contains(update_id) {
            return Ok(true);
        }
        let now_micros = time::get_timestamp_micros();
        self.store_provider
            .idempotency_facade()
            .marker_exists(update_id, now_micros)
            .await
    }

    /// Record the update identifier as seen without deciding ownership.
    ///
    /// Return `true` when this call created the marker.
    pub async fn mark_seen(&self, update_id: i64) -> Result<bool, BotError> {
        let now_micros = time::get_timestamp_micros();
        let inserted = self
            .store_provider
            .idempotency_facade()
            .marker_insert_if_absent(update_id, now_micros, self.marker_ttl_micros)
            .await?;
        self.recent_updates.insert(update_id).await;
        Ok(inserted)
    }

    /// Atomically claim the update identifier.
    ///
    /// Exactly one caller per update identifier gets [GateDecision::Fresh]
    /// within the marker's time to live. Everyone else, and every caller the
    /// store fails for, gets [GateDecision::Duplicate].
    pub async fn check_and_mark(&self, update_id: i64) -> GateDecision {
        if self.recent_updates.contains(update_id) {
            if log::log_enabled!(log::Level::Debug) {
                log::debug!("Update {update_id} was found in the recent window cache.");
            }
            return GateDecision::Duplicate;
        }
        let now_micros = time::get_timestamp_micros();
        match self
            .store_provider
            .idempotency_facade()
            .marker_insert_if_absent(update_id, now_micros, self.marker_ttl_micros)
            .await
        {
            Ok(inserted) => {
                self.recent_updates.insert(update_id).await;
                if inserted {
                    GateDecision::Fresh
                } else {
                    GateDecision::Duplicate
                }
            }
            Err(e) => {
                log::warn!("Dropping update {update_id}: idempotency store unavailable: {e}");
                self.store_provider
                    .error_log_facade()
                    .error_insert(
                        now_micros,
                        "update_gate",
                        &format!("dropped update {update_id}: {e}"),
                    )
                    .await;
                GateDecision::Duplicate
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrdesk_dbp::bot::BotErrorKind;
    use hrdesk_dbp::bot::EmployeeGist;
    use hrdesk_dbp::bot::HrRequest;
    use hrdesk_dbp::dbp::facades::EmployeeFacade;
    use hrdesk_dbp::dbp::facades::ErrorLogFacade;
    use hrdesk_dbp::dbp::facades::IdempotencyFacade;
    use hrdesk_dbp::dbp::facades::RequestLogFacade;
    use hrdesk_dbp_mem::InMemoryStoreProvider;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn first_sighting_is_fresh_then_duplicate() {
        let store_provider =
            Arc::new(InMemoryStoreProvider::new(1000).await.as_store_provider());
        let gate = UpdateGate::new(&store_provider, 50, 86_400_000_000);
        assert!(!gate.is_seen(42).await.unwrap());
        assert_eq!(gate.check_and_mark(42).await, GateDecision::Fresh);
        assert!(gate.is_seen(42).await.unwrap());
        assert_eq!(gate.check_and_mark(42).await, GateDecision::Duplicate);
        // A different identifier is unaffected
        assert_eq!(gate.check_and_mark(43).await, GateDecision::Fresh);
    }

    #[tokio::test]
    async fn duplicate_is_detected_without_local_cache() {
        // Two gates over the same store mimic two bot instances.
        let store_provider =
            Arc::new(InMemoryStoreProvider::new(1000).await.as_store_provider());
        let first = UpdateGate::new(&store_provider, 50, 86_400_000_000);
        let second = UpdateGate::new(&store_provider, 50, 86_400_000_000);
        assert_eq!(first.check_and_mark(7).await, GateDecision::Fresh);
        assert_eq!(second.check_and_mark(7).await, GateDecision::Duplicate);
    }

    #[tokio::test]
    async fn concurrent_claims_have_a_single_winner() {
        let store_provider =
            Arc::new(InMemoryStoreProvider::new(1000).await.as_store_provider());
        let gate = UpdateGate::new(&store_provider, 50, 86_400_000_000);
        let mut join_handles = Vec::new();
        for _ in 0..8 {
            let gate = Arc::clone(&gate);
            join_handles.push(tokio::spawn(
                async move { gate.check_and_mark(1001).await },
            ));
        }
        let mut fresh = 0;
        for join_handle in join_handles {
            if join_handle.await.unwrap() == GateDecision::Fresh {
                fresh += 1;
            }
        }
        assert_eq!(fresh, 1);
    }

    #[tokio::test]
    async fn store_failure_fails_closed_and_is_recorded() {
        let facades = Arc::new(FailingFacades::default());
        let store_provider = Arc::new(StoreProvider::new(Arc::clone(&facades) as _));
        let gate = UpdateGate::new(&store_provider, 50, 86_400_000_000);
        assert_eq!(gate.check_and_mark(9).await, GateDecision::Duplicate);
        assert_eq!(facades.error_rows.load(Ordering::Relaxed), 1);
        // A failed claim must not poison the local cache either.
        assert_eq!(gate.check_and_mark(9).await, GateDecision::Duplicate);
        assert_eq!(facades.error_rows.load(Ordering::Relaxed), 2);
    }

    /// Test double where the idempotency store is down but the error log
    /// still accepts rows.
    #[derive(Default)]
    struct FailingFacades {
        error_rows: AtomicUsize,
    }

    impl StoreProviderFacades for FailingFacades {
        fn idempotency_facade(&self) -> &dyn IdempotencyFacade {
            self
        }
        fn employee_facade(&self) -> &dyn EmployeeFacade {
            self
        }
        fn request_log_facade(&self) -> &dyn RequestLogFacade {
            self
        }
        fn error_log_facade(&self) -> &dyn ErrorLogFacade {
            self
        }
    }

    #[async_trait::async_trait]
    impl IdempotencyFacade for FailingFacades {
        async fn marker_insert_if_absent(
            &self,
            _update_id: i64,
            _now_micros: u64,
            _ttl_micros: u64,
        ) -> Result<bool, BotError> {
            Err(BotErrorKind::StoreUnavailable.error_with_msg("store is down"))
        }

        async fn marker_exists(
            &self,
            _update_id: i64,
            _now_micros: u64,
        ) -> Result<bool, BotError> {
            Err(BotErrorKind::StoreUnavailable.error_with_msg("store is down"))
        }
    }

    #[async_trait::async_trait]
    impl EmployeeFacade for FailingFacades {
        async fn employee_by_user_id(
            &self,
            _user_id: i64,
        ) -> Result<Option<EmployeeGist>, BotError> {
            Err(BotErrorKind::StoreUnavailable.error_with_msg("store is down"))
        }
    }

    #[async_trait::async_trait]
    impl RequestLogFacade for FailingFacades {
        async fn request_insert(&self, _hr_request: &HrRequest) -> Result<(), BotError> {
            Err(BotErrorKind::StoreUnavailable.error_with_msg("store is down"))
        }
    }

    #[async_trait::async_trait]
    impl ErrorLogFacade for FailingFacades {
        async fn error_insert(&self, _ts_micros: u64, _scope: &str, _message: &str) {
            self.error_rows.fetch_add(1, Ordering::Relaxed);
        }
    }
}
