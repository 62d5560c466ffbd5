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

//! Per-process guard against overlapping webhook invocations.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/** Per-process guard against overlapping webhook invocations.

Only one update is processed at a time within this process. When the guard is
held, further acquires fail and the new update is dropped without processing.

This only protects a single instance. Cross-instance at-most-once handling is
carried by the idempotency store's atomic insert, never by this guard.
*/
pub struct SingleFlight {
    busy: Arc<AtomicBool>,
}

impl SingleFlight {
    /// Return a new instance.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            busy: Arc::new(AtomicBool::default()),
        })
    }

    /// Try to acquire the guard.
    ///
    /// Return `None` when another invocation currently holds it. The guard is
    /// released when the returned permit is dropped.
    pub fn acquire(&self) -> Option<SingleFlightPermit> {
        if self.busy.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(SingleFlightPermit {
                busy: Arc::clone(&self.busy),
            })
        }
    }
}

/// Releases the [SingleFlight] guard on drop.
pub struct SingleFlightPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for SingleFlightPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_while_held() {
        let single_flight = SingleFlight::new();
        let permit = single_flight.acquire();
        assert!(permit.is_some());
        assert!(single_flight.acquire().is_none());
        drop(permit);
        assert!(single_flight.acquire().is_some());
    }

    #[tokio::test]
    async fn exactly_one_concurrent_acquire_succeeds() {
        let single_flight = SingleFlight::new();
        let mut join_handles = Vec::new();
        for _ in 0..8 {
            let single_flight = Arc::clone(&single_flight);
            join_handles.push(tokio::spawn(async move {
                if let Some(_permit) = single_flight.acquire() {
                    // Hold the permit over an await point like real
                    // processing does.
                    tokio::time::sleep(tokio::time::Duration::from_millis(64)).await;
                    true
                } else {
                    false
                }
            }));
        }
        let mut acquired = 0;
        for join_handle in join_handles {
            if join_handle.await.unwrap() {
                acquired += 1;
            }
        }
        assert_eq!(acquired, 1);
    }
}
