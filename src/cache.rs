//! Transient cache of release metadata.
//!
//! One entry per repository identifier, each holding the last fetched
//! release and an expiry instant. Reads are TTL-aware: an entry
//! satisfies a lookup if and only if the current time is strictly
//! before its expiry. Expired entries are dropped lazily on read;
//! nothing sweeps the map.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::github::Release;

/// Default cache time-to-live.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Time source, injectable so expiry boundaries are testable.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    release: Release,
    expires_at: Instant,
}

/// Key-value store of release snapshots with lazy TTL invalidation.
pub struct ReleaseCache<C: Clock = SystemClock> {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: C,
}

impl ReleaseCache<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> ReleaseCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Returns the cached release for `key` if its entry is still live.
    pub fn get(&self, key: &str) -> Option<Release> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if self.clock.now() < entry.expires_at => Some(entry.release.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a fresh snapshot, replacing any previous entry wholesale.
    pub fn set(&self, key: &str, release: Release) {
        let entry = CacheEntry {
            release,
            expires_at: self.clock.now() + self.ttl,
        };
        self.entries.lock().unwrap().insert(key.to_string(), entry);
    }

    /// Drops the entry immediately so the next read misses.
    pub fn delete(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}
