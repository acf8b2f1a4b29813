use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::debug;

use nd_types::{DiffKey, DiffStats};

/// Capacity used by [`ResultCache::default`].
pub const DEFAULT_CAPACITY: usize = 100;

/// Address of one cached result.
///
/// A result rendered with the line transcript and one rendered without it
/// are different entries, so a request for the expandable view never gets
/// a transcript-less hit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub key: DiffKey,
    pub transcript: bool,
}

impl CacheKey {
    /// Address the result for `key`, with or without the line transcript.
    pub fn new(key: DiffKey, transcript: bool) -> Self {
        Self { key, transcript }
    }
}

struct CacheEntry {
    result: Arc<DiffStats>,
    /// Logical time of the last read or write, from `ResultCache::clock`.
    last_used: AtomicU64,
}

/// Point-in-time counters for a [`ResultCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub sweeps: u64,
}

/// Bounded, thread-safe map from comparison key to computed statistics.
///
/// Lookups take the shared side of an `RwLock` and proceed concurrently;
/// each hit stamps its entry through an atomic, so recency tracking never
/// needs the exclusive lock. Inserts and eviction sweeps run in one
/// exclusive critical section with no other lock taken inside it.
///
/// Eviction is approximate LRU: when a new key arrives and the cache already
/// holds `capacity` entries, only the `capacity / 2` most recently used
/// entries are kept (at most `capacity - 2`, so tiny caches do not sweep on
/// every insert). Evicting never changes a surviving entry's value; an
/// evicted comparison is simply recomputed on its next request.
pub struct ResultCache {
    capacity: usize,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    clock: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    evictions: AtomicU64,
    sweeps: AtomicU64,
}

impl ResultCache {
    /// Create an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero disables caching: every lookup misses and inserts
    /// are dropped.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(HashMap::new()),
            clock: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            insertions: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            sweeps: AtomicU64::new(0),
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns `true` if `key` is cached. Does not count as a use.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.read().contains_key(key)
    }

    /// Look up a previously stored result.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<DiffStats>> {
        let map = self.read();
        match map.get(key) {
            Some(entry) => {
                entry.last_used.store(self.tick(), Ordering::Relaxed);
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(&entry.result))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a result, sweeping out the older half first if the cache is
    /// full and `key` is new.
    pub fn put(&self, key: CacheKey, result: Arc<DiffStats>) {
        if self.capacity == 0 {
            return;
        }
        let stamp = self.tick();
        let mut map = self.write();
        if !map.contains_key(&key) && map.len() >= self.capacity {
            self.sweep(&mut map);
        }
        map.insert(
            key,
            CacheEntry {
                result,
                last_used: AtomicU64::new(stamp),
            },
        );
        self.insertions.fetch_add(1, Ordering::Relaxed);
    }

    /// Remove all entries. Counters are kept.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Snapshot of size and counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.insertions.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            sweeps: self.sweeps.load(Ordering::Relaxed),
        }
    }

    /// Keep only the most recently used entries: half the capacity, and at
    /// least two slots free so the next insert does not sweep again.
    ///
    /// Called with the write lock held; stamps cannot move underneath it.
    fn sweep(&self, map: &mut HashMap<CacheKey, CacheEntry>) {
        let before = map.len();
        let keep = (self.capacity / 2).min(self.capacity.saturating_sub(2));
        if before <= keep {
            return;
        }

        let mut stamps: Vec<u64> = map
            .values()
            .map(|entry| entry.last_used.load(Ordering::Relaxed))
            .collect();
        stamps.sort_unstable();
        // Stamps are unique (one clock tick each), so this removes exactly
        // `before - keep` entries.
        let cutoff = stamps[before - keep - 1];
        map.retain(|_, entry| entry.last_used.load(Ordering::Relaxed) > cutoff);

        let after = map.len();
        self.evictions
            .fetch_add((before - after) as u64, Ordering::Relaxed);
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        debug!(before, after, capacity = self.capacity, "cache eviction sweep");
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    // Entries are plain data and every critical section leaves the map
    // consistent, so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("capacity", &self.capacity)
            .field("entry_count", &self.len())
            .finish()
    }
}
