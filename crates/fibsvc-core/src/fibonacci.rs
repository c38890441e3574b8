//! Fibonacci strategies.
//!
//! F(0) = 0, F(1) = 1, F(n) = F(n-1) + F(n-2). All strategies agree on
//! every value in `[0, MAX_SIZE]`; they differ only in cost, which is the
//! point of the benchmark.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cache::FibCache;
use crate::error::FibError;
use crate::size::Size;

/// Sizes up to this value go through the memo table under [`Strategy::Hybrid`].
pub const HYBRID_THRESHOLD: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Naive recursion, O(2^n).
    Recursive,
    /// Recursion through a [`FibCache`].
    Memoized,
    /// Two-variable loop, O(n) time and O(1) space.
    #[default]
    Iterative,
    /// Memoized up to [`HYBRID_THRESHOLD`], iterative above.
    Hybrid,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Self::Recursive,
        Self::Memoized,
        Self::Iterative,
        Self::Hybrid,
    ];

    pub fn uses_cache(self) -> bool {
        matches!(self, Self::Memoized | Self::Hybrid)
    }

    /// Run the strategy. `cache` is only consulted by the strategies for which
    /// [`uses_cache`](Self::uses_cache) is true; without one they fall back
    /// to the iterative loop.
    pub fn compute(self, size: Size, cache: Option<&dyn FibCache>) -> u64 {
        let n = size.get();
        match (self, cache) {
            (Self::Recursive, _) => recursive(n),
            (Self::Memoized, Some(cache)) => memoized(n, cache),
            (Self::Hybrid, Some(cache)) if n <= HYBRID_THRESHOLD => memoized(n, cache),
            _ => iterative(n),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recursive => write!(f, "recursive"),
            Self::Memoized => write!(f, "memoized"),
            Self::Iterative => write!(f, "iterative"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = FibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recursive" | "naive" => Ok(Self::Recursive),
            "memoized" | "cached" => Ok(Self::Memoized),
            "iterative" => Ok(Self::Iterative),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(FibError::InvalidStrategy(s.to_string())),
        }
    }
}

fn recursive(n: u32) -> u64 {
    if n < 2 {
        return u64::from(n);
    }
    recursive(n - 1) + recursive(n - 2)
}

fn iterative(n: u32) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

fn memoized(n: u32, cache: &dyn FibCache) -> u64 {
    if n < 2 {
        return u64::from(n);
    }
    if let Some(v) = cache.get(n) {
        return v;
    }
    let v = memoized(n - 1, cache) + memoized(n - 2, cache);
    cache.set(n, v);
    v
}
