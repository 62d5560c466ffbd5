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

//! Lock-less cache of recently seen update identifiers.

use crossbeam_skiplist::SkipMap;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

struct QueueEntry {
    update_id: i64,
    visited: AtomicBool,
}

impl QueueEntry {
    /// Return a new instance.
    pub fn new(update_id: i64) -> Self {
        Self {
            update_id,
            visited: AtomicBool::default(),
        }
    }

    /// Return the cached update identifier.
    pub fn get_update_id(&self) -> i64 {
        self.update_id
    }

    /// Set the `visited` flag and return previous value.
    pub fn set_visited(&self, visited: bool) -> bool {
        self.visited.swap(visited, Ordering::Relaxed)
    }
}

/** Lock-less cache of recently seen update identifiers.

Fast path in front of the authoritative idempotency store. A hit here means
the update was already observed by this process, so the store round-trip can
be skipped. A miss means nothing: the store stays the source of truth.

Eviction uses [SIEVE](https://junchengyang.com/publication/nsdi24-SIEVE.pdf)
in a lock-less version with lazy background eviction, so actual cache size
will overshoot the target during high load.
*/
pub struct RecentUpdateCache {
    eviction_running: AtomicBool,
    target_max_size: u64,
    pos: AtomicU64,
    count: AtomicU64,
    queue_map: SkipMap<u64, QueueEntry>,
    cache: SkipMap<i64, u64>,
    hand: AtomicU64,
}

/* Implementation notes:
```
            SIEVE   SkipMap
Oldest      tail    .front()
Newest      head    .back()
Previous    .prev   .next()
```
*/
impl RecentUpdateCache {
    /// Return a new instance.
    pub fn new(target_max_size: u64) -> Arc<Self> {
        Arc::new(Self {
            eviction_running: AtomicBool::default(),
            target_max_size,
            pos: AtomicU64::default(),
            count: AtomicU64::default(),
            queue_map: SkipMap::default(),
            cache: SkipMap::default(),
            hand: AtomicU64::default(),
        })
    }

    /// Return `true` if the cache holds the requested update identifier.
    pub fn contains(&self, update_id: i64) -> bool {
        self.cache
            .get(&update_id)
            .is_some_and(|entry| self.set_visited(entry.value(), true) | true)
    }

    /// Set the visited flag for cache entry and return the old value.
    fn set_visited(&self, pos: &u64, visited: bool) -> bool {
        self.queue_map
            .get(pos)
            .is_some_and(|entry| entry.value().set_visited(visited))
    }

    /// Insert update identifier unless it already was present.
    pub async fn insert(self: &Arc<Self>, update_id: i64) {
        let pos = self.pos.fetch_add(1, Ordering::Relaxed);
        let pos_in_cache = *self.cache.get_or_insert_with(update_id, || pos).value();
        if pos.eq(&pos_in_cache) {
            // Cache entry did not exist
            self.queue_map.insert(pos, QueueEntry::new(update_id));
            let count = self.count.fetch_add(1, Ordering::Relaxed) + 1;
            if log::log_enabled!(log::Level::Trace) {
                log::trace!("After insert of update {update_id} cache will contain {count} entries.");
            }
            if count > self.target_max_size {
                // Run cache eviction (eventually)
                let self_clone = Arc::clone(self);
                tokio::spawn(async move { self_clone.run_eviction().await });
            }
        }
    }

    async fn run_eviction(&self) {
        if self.eviction_running.swap(true, Ordering::SeqCst) {
            // Eviction is already running
            return;
        }
        let start_hand_pos = self.hand.load(Ordering::Relaxed);
        let mut hand_entry_opt = self.queue_map.get(&start_hand_pos);
        while self.count.load(Ordering::Relaxed) > self.target_max_size {
            if hand_entry_opt.is_none() {
                // Try from the oldest (tail) entry again
                if log::log_enabled!(log::Level::Trace) {
                    log::trace!("Moving hand to tail.");
                }
                hand_entry_opt = self.queue_map.front();
            }
            if let Some(hand_entry) = hand_entry_opt.as_ref() {
                let hand_pos = *hand_entry.key();
                if !self.set_visited(&hand_pos, false) {
                    let update_id = hand_entry.value().get_update_id();
                    self.queue_map.remove(&hand_pos);
                    self.cache.remove(&update_id);
                    // Kicked one out
                    let counter_after_eviction = self.count.fetch_sub(1, Ordering::Relaxed) - 1;
                    if counter_after_eviction - self.target_max_size <= self.target_max_size >> 2 {
                        // Unless we overshoot max size by more than 25%.. don't stop the world..
                        tokio::task::yield_now().await;
                    }
                    if log::log_enabled!(log::Level::Trace) {
                        log::trace!(
                            "After kicking out update {update_id} the cache holds {counter_after_eviction} entries."
                        );
                    }
                }
                hand_entry_opt = hand_entry.next();
            } else {
                // Unable to get front of queue...
                break;
            }
        }
        if let Some(hand_entry) = hand_entry_opt {
            // Store new hand pos
            self.hand.store(*hand_entry.key(), Ordering::Relaxed);
        }
        // Eviction is no longer running
        self.eviction_running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    pub fn initialize_env_logger() {
        env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init()
            .map_err(|e| {
                log::trace!("Env logger for testing was probably already initialized: {e:?}")
            })
            .ok();
    }

    #[tokio::test]
    async fn test_recent_update_cache() {
        initialize_env_logger();
        let cache = RecentUpdateCache::new(2);
        assert!(!cache.contains(1));
        cache.insert(1).await;
        cache.insert(2).await;
        assert!(cache.contains(1));
        assert!(cache.contains(2));
        cache.insert(3).await;
        assert!(cache.contains(3));
        await_eviction_run(&cache).await;
        assert!(!cache.contains(1));
        assert!(cache.contains(2));
        assert!(cache.contains(3));
        cache.insert(4).await;
        await_eviction_run(&cache).await;
        assert!(cache.contains(3));
        cache.insert(5).await;
        await_eviction_run(&cache).await;
        assert!(!cache.contains(4));
    }

    // In order make tests predictable we need to wait for eviction to happen
    async fn await_eviction_run(cache: &Arc<RecentUpdateCache>) {
        while cache.count.load(Ordering::Relaxed) > cache.target_max_size {
            tokio::time::sleep(tokio::time::Duration::from_millis(64)).await;
        }
    }
}
