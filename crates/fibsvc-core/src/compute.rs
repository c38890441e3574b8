use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{CacheStats, FibCache};
use crate::error::{FibError, FibResult};
use crate::fibonacci::Strategy;
use crate::size::Size;
use crate::stats::{ServiceStats, StatsSnapshot};

/// Size used by [`ComputeService::self_check`].
pub const SELF_CHECK_SIZE: u32 = 10;
/// F([`SELF_CHECK_SIZE`]).
pub const SELF_CHECK_EXPECTED: u64 = 55;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResponse {
    pub result: u64,
    pub size: u32,
    pub latency_ms: f64,
    pub strategy: Strategy,
}

impl ComputeResponse {
    pub fn to_json(&self) -> FibResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The compute-and-report contract: normalize the size, run the configured
/// strategy, time it.
pub struct ComputeService {
    strategy: Strategy,
    cache: Option<Arc<dyn FibCache>>,
    stats: ServiceStats,
}

impl ComputeService {
    /// Memoized and hybrid strategies require a cache.
    pub fn new(strategy: Strategy, cache: Option<Arc<dyn FibCache>>) -> FibResult<Self> {
        if strategy.uses_cache() && cache.is_none() {
            return Err(FibError::Config(format!(
                "strategy '{strategy}' requires a cache"
            )));
        }
        Ok(Self {
            strategy,
            cache,
            stats: ServiceStats::default(),
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Compute from a raw, possibly missing or malformed `size` parameter.
    pub fn compute(&self, raw_size: Option<&str>) -> ComputeResponse {
        self.compute_size(Size::from_param(raw_size))
    }

    pub fn compute_size(&self, size: Size) -> ComputeResponse {
        let (result, elapsed) = self.run(size);
        self.stats.record(elapsed);
        let latency_ms = elapsed.as_secs_f64() * 1000.0;

        debug!(
            size = size.get(),
            result,
            latency_ms,
            strategy = %self.strategy,
            "computed"
        );

        ComputeResponse {
            result,
            size: size.get(),
            latency_ms,
            strategy: self.strategy,
        }
    }

    /// Compute F(10) outside the request statistics. Used by health checks.
    pub fn self_check(&self) -> bool {
        let size = Size::new(SELF_CHECK_SIZE).unwrap_or_default();
        self.run(size).0 == SELF_CHECK_EXPECTED
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    fn run(&self, size: Size) -> (u64, Duration) {
        let start = Instant::now();
        let result = self.strategy.compute(size, self.cache.as_deref());
        (result, start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fibonacci::tests::TestCache;
    use crate::size::DEFAULT_SIZE;

    fn iterative() -> ComputeService {
        ComputeService::new(Strategy::Iterative, None).unwrap()
    }

    fn memoized() -> ComputeService {
        ComputeService::new(Strategy::Memoized, Some(Arc::new(TestCache::default()))).unwrap()
    }

    #[test]
    fn test_compute_in_range() {
        let resp = iterative().compute(Some("10"));
        assert_eq!(resp.result, 55);
        assert_eq!(resp.size, 10);
        assert!(resp.latency_ms >= 0.0);
        assert_eq!(resp.strategy, Strategy::Iterative);
    }

    #[test]
    fn test_compute_bounds() {
        let svc = iterative();
        assert_eq!(svc.compute(Some("0")).result, 0);
        assert_eq!(svc.compute(Some("1")).result, 1);
        assert_eq!(svc.compute(Some("50")).result, 12586269025);
    }

    #[test]
    fn test_invalid_inputs_default() {
        let svc = iterative();
        for raw in [None, Some("abc"), Some("-3"), Some("51"), Some("999"), Some("")] {
            let resp = svc.compute(raw);
            assert_eq!(resp.size, DEFAULT_SIZE, "raw={raw:?}");
            assert_eq!(resp.result, 832040, "raw={raw:?}");
            assert!(resp.latency_ms >= 0.0);
        }
    }

    #[test]
    fn test_cache_strategy_requires_cache() {
        assert!(matches!(
            ComputeService::new(Strategy::Memoized, None),
            Err(FibError::Config(_))
        ));
        assert!(ComputeService::new(Strategy::Hybrid, None).is_err());
        assert!(ComputeService::new(Strategy::Recursive, None).is_ok());
    }

    #[test]
    fn test_memoized_service_reports_cache_stats() {
        let svc = memoized();
        assert_eq!(svc.compute(Some("30")).result, 832040);
        let stats = svc.cache_stats().unwrap();
        assert_eq!(stats.entries, 29);
        assert!(iterative().cache_stats().is_none());
    }

    #[test]
    fn test_stats_count_requests() {
        let svc = iterative();
        svc.compute(Some("5"));
        svc.compute(None);
        assert_eq!(svc.stats().requests, 2);
    }

    #[test]
    fn test_self_check_not_counted() {
        let svc = memoized();
        assert!(svc.self_check());
        assert_eq!(svc.stats().requests, 0);
    }

    #[test]
    fn test_concurrent_calls_identical() {
        let svc = &memoized();
        let results: Vec<u64> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(move || svc.compute(Some("40")).result))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.iter().all(|&r| r == 102334155));
        assert_eq!(svc.stats().requests, 8);
    }

    #[test]
    fn test_response_json_shape() {
        let json = iterative().compute(Some("10")).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"], 55);
        assert_eq!(value["size"], 10);
        assert!(value["latency_ms"].as_f64().unwrap() >= 0.0);
        assert_eq!(value["strategy"], "iterative");
    }
}
