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

//! Ephemeral in-memory implementation of [StoreProvider].

mod inmem_facades;

use self::inmem_facades::InMemProviderFacades;
use crossbeam_skiplist::SkipMap;
use crossbeam_skiplist::SkipSet;
use hrdesk_dbp::bot::EmployeeGist;
use hrdesk_dbp::bot::HrRequest;
use hrdesk_dbp::bot::ProcessedMarker;
use hrdesk_dbp::dbp::StoreProvider;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

/// Ephemeral in-memory implementation of [StoreProvider].
pub struct InMemoryStoreProvider {
    /// Retention bound for processed-update markers.
    marker_retention: usize,
    /// Monotonic insert sequence shared by markers and log rows.
    insert_seq: AtomicU64,
    /// Markers by update identifier. The value carries the insert sequence so
    /// concurrent inserters can tell whose insert won.
    markers: SkipMap<i64, (u64, ProcessedMarker)>,
    /// Marker insert order, oldest first, for retention trimming.
    marker_order: SkipSet<(u64, i64)>,
    /// Employee directory by Telegram user identifier.
    employees: SkipMap<i64, EmployeeGist>,
    /// HR request log in insert order.
    requests: SkipMap<u64, HrRequest>,
    /// Error log in insert order.
    errors: SkipMap<u64, (u64, String, String)>,
}

impl InMemoryStoreProvider {
    /// Return a new instance with the provided marker retention bound.
    pub async fn new(marker_retention: usize) -> Arc<Self> {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Using in-mem store provider. marker_retention: {marker_retention}");
        }
        Arc::new(Self {
            marker_retention,
            insert_seq: AtomicU64::default(),
            markers: SkipMap::default(),
            marker_order: SkipSet::default(),
            employees: SkipMap::default(),
            requests: SkipMap::default(),
            errors: SkipMap::default(),
        })
    }

    /// Get [StoreProvider] instance.
    pub fn as_store_provider(self: &Arc<Self>) -> StoreProvider {
        StoreProvider::new(Arc::new(InMemProviderFacades::new(self)))
    }

    /// Seed or replace an employee directory entry.
    pub fn employee_upsert(&self, employee: EmployeeGist) {
        self.employees.insert(employee.get_user_id(), employee);
    }

    /// Number of live marker entries.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Number of filed request rows.
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Number of error log rows.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
