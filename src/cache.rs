//! Content-addressed LRU cache of parse results.
//!
//! Keys are content fingerprints produced by a [`Fingerprinter`]. Values are
//! complete [`ParseResult`]s shared through [`Arc`], so a hit hands out the
//! stored result without copying its records.
//!
//! One [`Mutex`] guards the entries, the recency index and the counters
//! together: a `get` never observes a half-applied `set`, and capacity
//! eviction happens in the same critical section as the insertion that
//! triggered it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chatsift::cache::ContentCache;
//! use chatsift::core::ParseResult;
//!
//! let cache = ContentCache::new(2);
//! cache.set("a", Arc::new(ParseResult::client_error("a")));
//! cache.set("b", Arc::new(ParseResult::client_error("b")));
//! cache.get("a");
//! cache.set("c", Arc::new(ParseResult::client_error("c")));
//!
//! // "b" was the least recently used entry
//! assert!(cache.get("b").is_none());
//! assert!(cache.get("a").is_some());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::core::ParseResult;

/// Turns raw content into a cache key.
pub trait Fingerprinter: Send + Sync {
    /// Returns an opaque key for `content`.
    fn fingerprint(&self, content: &str) -> String;
}

impl<F> Fingerprinter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn fingerprint(&self, content: &str) -> String {
        self(content)
    }
}

/// SHA-256 of the trimmed content, hex encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Fingerprinter;

impl Fingerprinter for Sha256Fingerprinter {
    fn fingerprint(&self, content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.trim().as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub capacity: usize,
    pub len: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
}

#[derive(Debug)]
struct Entry {
    value: Arc<ParseResult>,
    tick: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, Entry>,
    /// Last-use tick → key. The first entry is the least recently used.
    recency: BTreeMap<u64, String>,
    next_tick: u64,
    hits: u64,
    misses: u64,
    insertions: u64,
    evictions: u64,
}

impl CacheState {
    fn bump(&mut self) -> u64 {
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }
}

/// Fixed-capacity least-recently-used store.
#[derive(Debug)]
pub struct ContentCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl ContentCache {
    /// Creates a cache holding at most `capacity` results. A capacity of `0`
    /// never stores anything.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Poisoning is ignored: stored values are immutable snapshots.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Looks up `key`, marking it as most recently used on a hit.
    pub fn get(&self, key: &str) -> Option<Arc<ParseResult>> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let tick = state.bump();

        let Some(entry) = state.entries.get_mut(key) else {
            state.misses += 1;
            debug!(key, "Cache miss");
            return None;
        };
        let previous = std::mem::replace(&mut entry.tick, tick);
        let value = Arc::clone(&entry.value);

        state.recency.remove(&previous);
        state.recency.insert(tick, key.to_string());
        state.hits += 1;
        debug!(key, "Cache hit");
        Some(value)
    }

    /// Stores `value` under `key`, evicting the least recently used entry
    /// when the cache is full.
    pub fn set(&self, key: impl Into<String>, value: Arc<ParseResult>) {
        if self.capacity == 0 {
            return;
        }

        let key = key.into();
        let mut guard = self.lock();
        let state = &mut *guard;
        let tick = state.bump();

        if let Some(old) = state.entries.insert(key.clone(), Entry { value, tick }) {
            state.recency.remove(&old.tick);
        }
        state.recency.insert(tick, key.clone());
        state.insertions += 1;
        debug!(key = %key, "Cache set");

        while state.entries.len() > self.capacity {
            let Some((_, evicted)) = state.recency.pop_first() else {
                break;
            };
            state.entries.remove(&evicted);
            state.evictions += 1;
            debug!(key = %evicted, "Cache evict");
        }
    }

    /// Returns `true` if `key` is cached. Does not affect recency.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.recency.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            capacity: self.capacity,
            len: state.entries.len(),
            hits: state.hits,
            misses: state.misses,
            insertions: state.insertions,
            evictions: state.evictions,
        }
    }
}
