//! # Keyed query cache with request sharing
//!
//! [`QueryCache`] remembers successful fetch results per key for a freshness
//! window and shares one in-flight fetch between every caller asking for the
//! same key while it is pending.
//!
//! ## Slot lifecycle
//!
//! ```text
//!   (absent) --get_or_fetch--> Pending --Ok--> Ready --stale_time--> (refetch)
//!                                 |                 |
//!                                 +--Err--> (absent) <--gc_time--+
//! ```
//!
//! A `Ready` slot older than `gc_time` is dropped the next time the cache is
//! written to, so keys that are never asked for again do not accumulate.
//!
//! Errors are handed to every waiting caller and never stored, so the next
//! call goes back to the network. Removing or invalidating a key while its
//! fetch is pending detaches that fetch: its result still reaches the callers
//! already waiting on it but is not written back.
//!
//! The cache is single-threaded. It lives on the UI thread, holds no locks and
//! never keeps a `RefCell` borrow across an `.await`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};
use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::error::ApiError;

/// Default seconds a cached result stays fresh.
pub const DEFAULT_STALE_SECS: i64 = 5 * 60;
/// Default seconds an unused result is kept before it is dropped.
pub const DEFAULT_GC_SECS: i64 = 10 * 60;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub stale_time: TimeDelta,
    pub gc_time: TimeDelta,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_time: TimeDelta::seconds(DEFAULT_STALE_SECS),
            gc_time: TimeDelta::seconds(DEFAULT_GC_SECS),
        }
    }
}

type SharedFetch<V> = Shared<LocalBoxFuture<'static, Result<V, ApiError>>>;

enum Slot<V> {
    Ready { value: V, fetched_at: DateTime<Utc> },
    Pending { fetch: SharedFetch<V>, id: u64 },
}

pub struct QueryCache<K, V> {
    slots: Rc<RefCell<HashMap<K, Slot<V>>>>,
    next_id: Rc<Cell<u64>>,
    config: CacheConfig,
    clock: Rc<dyn Clock>,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
            next_id: Rc::clone(&self.next_id),
            config: self.config,
            clock: Rc::clone(&self.clock),
        }
    }
}

impl<K, V> std::fmt::Debug for QueryCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.slots.borrow().len())
            .field("config", &self.config)
            .finish()
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: CacheConfig, clock: impl Clock + 'static) -> Self {
        Self {
            slots: Rc::new(RefCell::new(HashMap::new())),
            next_id: Rc::new(Cell::new(0)),
            config,
            clock: Rc::new(clock),
        }
    }

    /// Fresh cached value, or the result of `fetch`.
    ///
    /// `fetch` is only called when there is neither a fresh value nor a
    /// pending fetch for `key`.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>> + 'static,
    {
        let (pending, id) = {
            let mut slots = self.slots.borrow_mut();
            self.collect_garbage(&mut slots);
            match slots.get(&key) {
                Some(Slot::Ready { value, fetched_at }) if self.is_fresh(*fetched_at) => {
                    return Ok(value.clone());
                }
                Some(Slot::Pending { fetch, id }) => (fetch.clone(), *id),
                _ => {
                    let id = self.next_id.get();
                    self.next_id.set(id + 1);
                    let pending = fetch().boxed_local().shared();
                    slots.insert(
                        key.clone(),
                        Slot::Pending {
                            fetch: pending.clone(),
                            id,
                        },
                    );
                    (pending, id)
                }
            }
        };

        let result = pending.await;
        self.settle(key, id, &result);
        result
    }

    /// Write back the outcome of fetch `id` if it still owns the slot.
    fn settle(&self, key: K, id: u64, result: &Result<V, ApiError>) {
        let mut slots = self.slots.borrow_mut();
        let owns_slot = matches!(slots.get(&key), Some(Slot::Pending { id: current, .. }) if *current == id);
        if !owns_slot {
            return;
        }
        match result {
            Ok(value) => {
                slots.insert(
                    key,
                    Slot::Ready {
                        value: value.clone(),
                        fetched_at: self.clock.now(),
                    },
                );
            }
            Err(err) => {
                tracing::debug!(error = %err, "fetch failed; not cached");
                slots.remove(&key);
            }
        }
    }

    /// Fresh cached value without fetching.
    pub fn get(&self, key: &K) -> Option<V> {
        match self.slots.borrow().get(key) {
            Some(Slot::Ready { value, fetched_at }) if self.is_fresh(*fetched_at) => {
                Some(value.clone())
            }
            _ => None,
        }
    }

    /// Store a value as if it had just been fetched.
    pub fn seed(&self, key: K, value: V) {
        let mut slots = self.slots.borrow_mut();
        self.collect_garbage(&mut slots);
        slots.insert(
            key,
            Slot::Ready {
                value,
                fetched_at: self.clock.now(),
            },
        );
    }

    pub fn remove(&self, key: &K) {
        self.slots.borrow_mut().remove(key);
    }

    /// Drop every entry so the next read of any key refetches.
    pub fn invalidate_all(&self) {
        self.slots.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    fn is_fresh(&self, fetched_at: DateTime<Utc>) -> bool {
        self.clock.now() - fetched_at < self.config.stale_time
    }

    /// Drop `Ready` slots past `gc_time`. Pending fetches are never dropped.
    fn collect_garbage(&self, slots: &mut HashMap<K, Slot<V>>) {
        let now = self.clock.now();
        let before = slots.len();
        slots.retain(|_, slot| match slot {
            Slot::Ready { fetched_at, .. } => now - *fetched_at < self.config.gc_time,
            Slot::Pending { .. } => true,
        });
        let dropped = before - slots.len();
        if dropped > 0 {
            tracing::trace!(dropped, "expired cache entries dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;

    /// Clock advanced by hand.
    #[derive(Clone, Default)]
    struct ManualClock(Rc<Cell<i64>>);

    impl ManualClock {
        fn advance(&self, by: TimeDelta) {
            self.0.set(self.0.get() + by.num_seconds());
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::from_timestamp(1_790_000_000 + self.0.get(), 0).unwrap_or_default()
        }
    }

    fn cache(clock: &ManualClock) -> QueryCache<&'static str, u32> {
        QueryCache::with_clock(CacheConfig::default(), clock.clone())
    }

    #[test]
    fn fresh_values_skip_the_fetch() {
        let clock = ManualClock::default();
        let cache = cache(&clock);
        let calls = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            let v = block_on(cache.get_or_fetch("k", move || async move {
                calls.set(calls.get() + 1);
                Ok(7)
            }))
            .unwrap();
            assert_eq!(v, 7);
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.get(&"k"), Some(7));
    }

    #[test]
    fn stale_values_are_refetched() {
        let clock = ManualClock::default();
        let cache = cache(&clock);
        cache.seed("k", 1);

        clock.advance(TimeDelta::minutes(4));
        assert_eq!(cache.get(&"k"), Some(1));

        clock.advance(TimeDelta::minutes(1));
        assert_eq!(cache.get(&"k"), None);
        let v = block_on(cache.get_or_fetch("k", || async { Ok(2) })).unwrap();
        assert_eq!(v, 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let clock = ManualClock::default();
        let cache = cache(&clock);

        let err = block_on(cache.get_or_fetch("k", || async { Err(ApiError::network()) }));
        assert!(err.is_err());
        assert!(cache.is_empty());

        let v = block_on(cache.get_or_fetch("k", || async { Ok(3) })).unwrap();
        assert_eq!(v, 3);
    }

    #[test]
    fn concurrent_callers_share_one_fetch() {
        let clock = ManualClock::default();
        let cache = cache(&clock);
        let (tx, rx) = oneshot::channel::<u32>();
        let calls = Rc::new(Cell::new(0));

        let first = {
            let calls = calls.clone();
            cache.get_or_fetch("k", move || {
                calls.set(calls.get() + 1);
                async move { rx.await.map_err(|_| ApiError::unknown("cancelled")) }
            })
        };
        let second = {
            let calls = calls.clone();
            cache.get_or_fetch("k", move || {
                calls.set(calls.get() + 1);
                async { Ok(99) }
            })
        };

        let (a, b) = block_on(async {
            let mut first = Box::pin(first);
            let mut second = Box::pin(second);
            assert!(futures::poll!(first.as_mut()).is_pending());
            assert!(futures::poll!(second.as_mut()).is_pending());
            tx.send(5).ok();
            futures::join!(first, second)
        });
        assert_eq!(a.unwrap(), 5);
        assert_eq!(b.unwrap(), 5);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn invalidation_detaches_pending_fetch() {
        let clock = ManualClock::default();
        let cache = cache(&clock);
        let (tx, rx) = oneshot::channel::<u32>();

        let old = cache.get_or_fetch("k", move || async move {
            rx.await.map_err(|_| ApiError::unknown("cancelled"))
        });
        let old_result = block_on(async {
            let mut old = Box::pin(old);
            assert!(futures::poll!(old.as_mut()).is_pending());
            cache.invalidate_all();
            tx.send(1).ok();
            old.await
        });

        assert_eq!(old_result.unwrap(), 1);
        assert_eq!(cache.get(&"k"), None);
    }

    #[test]
    fn unused_entries_are_dropped_after_gc_time() {
        let clock = ManualClock::default();
        let cache: QueryCache<u32, u32> =
            QueryCache::with_clock(CacheConfig::default(), clock.clone());

        for key in 0..100 {
            let v = block_on(cache.get_or_fetch(key, move || async move { Ok(key) })).unwrap();
            assert_eq!(v, key);
            clock.advance(TimeDelta::hours(1));
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn stale_entries_survive_until_gc_time() {
        let clock = ManualClock::default();
        let cache = cache(&clock);
        cache.seed("a", 1);

        clock.advance(TimeDelta::minutes(6));
        cache.seed("b", 2);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.len(), 2);

        clock.advance(TimeDelta::minutes(4));
        cache.seed("c", 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn seed_and_remove() {
        let clock = ManualClock::default();
        let cache = cache(&clock);
        cache.seed("a", 1);
        cache.seed("b", 2);
        cache.remove(&"a");
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.len(), 1);
    }
}
