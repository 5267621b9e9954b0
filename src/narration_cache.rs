// =============================================================================
// Narration Cache — TTL + LRU response cache for the narration collaborator
// =============================================================================
//
// Narrative text generated from an indicator report is expensive to produce,
// so callers may memoise it here.  The cache lives outside the indicator
// engine: nothing in `indicators`, `signals` or `analysis` touches it.
//
// Keys are request fingerprints: the hex SHA-256 of the request's canonical
// JSON (serde_json maps serialise with sorted keys, so field order in the
// caller's struct or map does not matter).
//
// Entries expire `ttl` after insertion, measured by an injectable `Clock`.
// When the cache is full, expired entries are purged first; if it is still
// full, the least-recently-used entry is evicted.
// =============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

// =============================================================================
// Clock
// =============================================================================

/// Source of "now" for expiry decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

// =============================================================================
// Fingerprint
// =============================================================================

/// Canonical fingerprint of a narration request.
pub fn fingerprint<T: Serialize + ?Sized>(request: &T) -> Result<String> {
    let canonical =
        serde_json::to_value(request).context("failed to canonicalise narration request")?;
    let bytes =
        serde_json::to_vec(&canonical).context("failed to serialise narration request")?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

// =============================================================================
// NarrationCache
// =============================================================================

struct CacheEntry {
    value: String,
    inserted_at: DateTime<Utc>,
    last_used: u64,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    tick: u64,
}

impl CacheInner {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

/// Thread-safe TTL/LRU cache of narration responses.
pub struct NarrationCache<C: Clock = SystemClock> {
    inner: Mutex<CacheInner>,
    ttl: Duration,
    max_entries: usize,
    clock: C,
}

impl NarrationCache<SystemClock> {
    /// Create a cache backed by the wall clock.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self::with_clock(ttl, max_entries, SystemClock)
    }
}

impl<C: Clock> NarrationCache<C> {
    /// Create a cache with an explicit clock.  `max_entries == 0` is treated
    /// as 1.
    pub fn with_clock(ttl: Duration, max_entries: usize, clock: C) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            ttl,
            max_entries: max_entries.max(1),
            clock,
        }
    }

    /// Cached response for `key`, if present and not expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let mut inner = self.inner.lock();

        let expired = self.is_expired(inner.entries.get(key)?, now);
        if expired {
            inner.entries.remove(key);
            trace!(key, "narration cache entry expired");
            return None;
        }

        let tick = inner.next_tick();
        let entry = inner.entries.get_mut(key)?;
        entry.last_used = tick;
        Some(entry.value.clone())
    }

    /// Store `value` under `key`, evicting as needed.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let now = self.clock.now();
        let mut inner = self.inner.lock();

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.max_entries {
            inner.entries.retain(|_, e| now - e.inserted_at < self.ttl);

            if inner.entries.len() >= self.max_entries {
                let lru = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, e)| e.last_used)
                    .map(|(k, _)| k.clone());
                if let Some(lru) = lru {
                    inner.entries.remove(&lru);
                    debug!(evicted = %lru, "narration cache full, evicted least recently used");
                }
            }
        }

        let tick = inner.next_tick();
        inner.entries.insert(
            key,
            CacheEntry {
                value: value.into(),
                inserted_at: now,
                last_used: tick,
            },
        );
    }

    /// Return the cached response for `request`, generating and storing it
    /// with `generate` on a miss.
    pub fn get_or_insert_with<T, F>(&self, request: &T, generate: F) -> Result<String>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> Result<String>,
    {
        let key = fingerprint(request)?;
        if let Some(hit) = self.get(&key) {
            trace!(key = %key, "narration cache hit");
            return Ok(hit);
        }

        let value = generate()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Drop every expired entry; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|_, e| now - e.inserted_at < self.ttl);
        before - inner.entries.len()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    fn is_expired(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.inserted_at >= self.ttl
    }
}
