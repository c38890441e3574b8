use serde::Serialize;

/// Concurrent memo table for Fibonacci values, keyed by `n`.
///
/// Entries are idempotent: the same key always maps to the same value, so
/// implementations never need to invalidate. A bounded implementation may
/// still evict.
pub trait FibCache: Send + Sync {
    fn get(&self, n: u32) -> Option<u64>;
    fn set(&self, n: u32, value: u64);

    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// `None` for unbounded caches.
    fn capacity(&self) -> Option<usize>;
    fn clear(&self);

    fn stats(&self) -> CacheStats;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: Option<usize>,
}

impl CacheStats {
    /// Hit percentage over all lookups, 0 when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64 * 100.0
    }
}
