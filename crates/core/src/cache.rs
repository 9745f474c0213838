use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

/// Cache keys and TTL windows for the cached backend reads.
pub mod keys {
    use std::time::Duration;

    pub const PORTFOLIO_SUMMARY: &str = "portfolio:summary";
    pub const API_STATUS: &str = "api:status";

    /// Shared prefix of every portfolio-derived key.
    /// Mutating operations invalidate this after the backend confirms.
    pub const PORTFOLIO_PREFIX: &str = "portfolio";

    pub const SUMMARY_TTL: Duration = Duration::from_millis(30_000);
    pub const STATUS_TTL: Duration = Duration::from_millis(60_000);
}

/// A cached response and when it was stored. The TTL is the reader's
/// policy, not the entry's: the same key can be read with any window.
struct CacheEntry {
    payload: Value,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.stored_at) > ttl
    }
}

/// In-memory response cache for backend reads.
///
/// Expiry is lazy: a `get` older than the caller's TTL removes the stale
/// entry on the spot and reports a miss. There is no background sweeper
/// and no capacity bound. `set` overwrites unconditionally.
///
/// All methods take `&self`, so one instance can serve any number of
/// in-flight operations. Lookups never fail, they only miss.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// A clone of the payload under `key`, if it is younger than `ttl`.
    pub fn get(&self, key: &str, ttl: Duration) -> Option<Value> {
        self.get_at(key, ttl, Instant::now())
    }

    /// Store `payload` under `key`, replacing whatever was there.
    pub fn set(&self, key: impl Into<String>, payload: Value) {
        self.set_at(key, payload, Instant::now());
    }

    /// Remove every entry whose key contains `pattern`.
    /// Returns how many entries were removed.
    pub fn invalidate(&self, pattern: &str) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.contains(pattern));
        let removed = before - entries.len();
        if removed > 0 {
            debug!("Invalidated {} cache entries matching '{}'", removed, pattern);
        }
        removed
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn get_at(&self, key: &str, ttl: Duration, now: Instant) -> Option<Value> {
        let mut entries = self.entries.lock();
        let expired = entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(ttl, now));
        if expired {
            // Purge, don't skip: the next write starts from a clean slot.
            entries.remove(key);
            debug!("Cache entry '{}' expired", key);
            return None;
        }
        entries.get(key).map(|entry| entry.payload.clone())
    }

    fn set_at(&self, key: impl Into<String>, payload: Value, now: Instant) {
        self.entries.lock().insert(
            key.into(),
            CacheEntry {
                payload,
                stored_at: now,
            },
        );
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
