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

//! Marker for an already handled update.

/** Record of a handled update identifier.

Once a marker exists for an identifier, every duplicate check for the same
identifier must report "seen" until the marker expires.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedMarker {
    update_id: i64,
    seen_ts_micros: u64,
    expires_ts_micros: u64,
}

impl ProcessedMarker {
    /// Return a new instance.
    pub fn new(update_id: i64, seen_ts_micros: u64, ttl_micros: u64) -> Self {
        Self {
            update_id,
            seen_ts_micros,
            expires_ts_micros: seen_ts_micros.saturating_add(ttl_micros),
        }
    }

    /// The marked update identifier.
    pub fn get_update_id(&self) -> i64 {
        self.update_id
    }

    /// Time the update was first handled in epoch micros.
    pub fn get_seen_ts_micros(&self) -> u64 {
        self.seen_ts_micros
    }

    /// Time the marker stops counting as "seen" in epoch micros.
    pub fn get_expires_ts_micros(&self) -> u64 {
        self.expires_ts_micros
    }

    /// Return `true` if the marker no longer counts as "seen".
    pub fn is_expired_at(&self, now_micros: u64) -> bool {
        now_micros >= self.expires_ts_micros
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_expiry() {
        let marker = ProcessedMarker::new(42, 1_000, 500);
        assert!(!marker.is_expired_at(1_499));
        assert!(marker.is_expired_at(1_500));
        assert_eq!(marker.get_update_id(), 42);
    }
}
