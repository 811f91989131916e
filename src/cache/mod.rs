/*!
 * Verdict Cache
 * Bounded TTL cache for check verdicts, keyed by lookup key
 *
 * Only the derived key and the verdict are retained; checkable objects are
 * never stored past their single check.
 */

use crate::core::limits::{DEFAULT_CACHE_ENTRIES, DEFAULT_CACHE_TTL};
use crate::core::types::LookupKey;
use crate::policy::CheckVerdict;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

/// Cached verdict with its expiry
struct CachedVerdict {
    verdict: CheckVerdict,
    expires_at: SystemTime,
}

/// Verdict cache with TTL expiry and a hard size cap
///
/// # Performance
/// - Consulted on EVERY intercepted operation; counters are relaxed atomics
#[repr(C, align(64))]
pub struct VerdictCache {
    cache: DashMap<LookupKey, CachedVerdict, RandomState>,
    max_entries: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl VerdictCache {
    /// Create new cache
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            cache: DashMap::with_capacity_and_hasher(max_entries, RandomState::new()),
            max_entries,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get cached verdict
    pub fn get(&self, key: &str) -> Option<CheckVerdict> {
        if let Some(entry) = self.cache.get(key) {
            let now = SystemTime::now();
            if entry.expires_at > now {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.verdict.clone().with_cached(true));
            } else {
                // Expired, remove it
                drop(entry);
                self.cache.remove(key);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store verdict in cache
    pub fn put(&self, key: LookupKey, verdict: CheckVerdict) {
        // Simple size limit - remove an arbitrary entry if full
        if self.cache.len() >= self.max_entries {
            // Bind the victim key in its own statement so the iterator's shard
            // lock is released before `remove` takes a write lock on the shard.
            let victim = self.cache.iter().next().map(|entry| entry.key().clone());
            if let Some(victim) = victim {
                self.cache.remove(&victim);
            }
        }

        let expires_at = SystemTime::now() + self.ttl;
        self.cache.insert(
            key,
            CachedVerdict {
                verdict,
                expires_at,
            },
        );
    }

    /// Drop all verdicts for a category (rule reload)
    pub fn invalidate_category(&self, category: crate::checkable::CheckCategory) {
        self.cache.retain(|_, v| v.verdict.category != category);
    }

    /// Clear entire cache
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            size: self.cache.len(),
            max_entries: self.max_entries,
            hits,
            misses,
            hit_rate,
        }
    }
}

impl Default for VerdictCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_ENTRIES, DEFAULT_CACHE_TTL)
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub size: usize,
    pub max_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}
