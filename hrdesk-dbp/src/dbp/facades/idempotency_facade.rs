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

//! Store facade for processed-update markers.

use crate::bot::BotError;

/** Store facade for processed-update markers.

This is the authoritative idempotency store. Implementations must bound
growth to the configured retention limit (oldest markers trimmed first) and
must treat markers past their time-to-live as absent.
*/
#[async_trait::async_trait]
pub trait IdempotencyFacade: Send + Sync {
    /// Insert a marker for `update_id` unless a live one already exists.
    ///
    /// Return `true` if the marker was newly inserted and `false` if a live
    /// marker for the same identifier was already present. This is the
    /// check-and-set the update gate relies on for at-most-once handling.
    async fn marker_insert_if_absent(
        &self,
        update_id: i64,
        now_micros: u64,
        ttl_micros: u64,
    ) -> Result<bool, BotError>;

    /// Return `true` if a live marker exists for `update_id`.
    async fn marker_exists(&self, update_id: i64, now_micros: u64) -> Result<bool, BotError>;
}
