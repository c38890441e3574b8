use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use fibsvc_core::{CacheStats, FibCache};

/// Unbounded memo table. Readers share the lock; each key is written at most
/// once and never evicted.
#[derive(Debug, Default)]
pub struct MapCache {
    map: RwLock<HashMap<u32, u64>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MapCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FibCache for MapCache {
    fn get(&self, n: u32) -> Option<u64> {
        let value = self
            .map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&n)
            .copied();
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    fn set(&self, n: u32, value: u64) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(n)
            .or_insert(value);
    }

    fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn capacity(&self) -> Option<usize> {
        None
    }

    fn clear(&self) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
            capacity: None,
        }
    }
}
