use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::trace;

use fibsvc_core::{CacheStats, FibCache, FibError, FibResult};

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 128;

/// Bounded memo table with least-recently-used eviction.
///
/// Lookups update recency, so even reads take the mutex.
pub struct LruCache {
    inner: Mutex<lru::LruCache<u32, u64>>,
    capacity: NonZeroUsize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LruCache {
    pub fn new(capacity: usize) -> FibResult<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| FibError::Config("lru cache capacity must be at least 1".into()))?;
        Ok(Self {
            inner: Mutex::new(lru::LruCache::new(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, lru::LruCache<u32, u64>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LruCache {
    fn default() -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(lru::LruCache::new(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl FibCache for LruCache {
    fn get(&self, n: u32) -> Option<u64> {
        let value = self.lock().get(&n).copied();
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    fn set(&self, n: u32, value: u64) {
        let mut cache = self.lock();
        if cache.contains(&n) {
            return;
        }
        if let Some((evicted, _)) = cache.push(n, value) {
            if evicted != n {
                trace!(evicted, "lru eviction");
            }
        }
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity.get())
    }

    fn clear(&self) {
        self.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
            capacity: self.capacity(),
        }
    }
}
