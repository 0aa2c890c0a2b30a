//! Time-bounded in-memory cache.
//!
//! Entries expire `ttl` after insertion. Expired entries are never returned
//! by [`TtlCache::get`]; they stay in the map until [`TtlCache::sweep`] or an
//! overwrite removes them.
//!
//! Fills that race with an invalidation are handled with a generation
//! counter: take a [`FillTicket`] before reading the backing store, then
//! insert with [`TtlCache::insert_if_current`]. Any invalidation that lands
//! between the two bumps the generation, and the stale fill is dropped.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Snapshot of the invalidation generation taken before a store read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillTicket(u64);

#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
    ttl: Duration,
    generation: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            generation: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.duration_since(entry.inserted_at) < self.ttl
    }

    /// Returns a clone of the cached value if it has not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.value.clone())
    }

    /// Inserts or replaces a value, restarting its TTL.
    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn fill_ticket(&self) -> FillTicket {
        FillTicket(self.generation.load(Ordering::Acquire))
    }

    /// Inserts only if no invalidation happened since `ticket` was taken.
    ///
    /// Returns whether the value was stored.
    pub fn insert_if_current(&self, key: K, value: V, ticket: FillTicket) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::Acquire) != ticket.0 {
            debug!("Discarding cache fill that raced with an invalidation");
            return false;
        }

        entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
        true
    }

    /// Removes `key` and fences off any fill that started before this call.
    ///
    /// Returns whether an entry was present.
    pub fn invalidate(&self, key: &K) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::AcqRel);
        entries.remove(key).is_some()
    }

    /// Evicts every expired entry and returns how many were removed.
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
