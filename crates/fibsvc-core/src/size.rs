//! Effective input size for a computation.
//!
//! Every raw `size` parameter is normalized into a [`Size`] before any
//! Fibonacci code runs. Values outside `[0, MAX_SIZE]` never reach the
//! exponential recursive strategy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest accepted size, inclusive.
pub const MAX_SIZE: u32 = 50;

/// Size used when the parameter is missing, malformed or out of range.
pub const DEFAULT_SIZE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Size(u32);

impl Size {
    /// Returns `None` when `n` is above [`MAX_SIZE`].
    pub fn new(n: u32) -> Option<Self> {
        (n <= MAX_SIZE).then_some(Self(n))
    }

    /// Normalize a raw query value. Never fails: anything that is not an
    /// integer in `[0, MAX_SIZE]` falls back to [`DEFAULT_SIZE`].
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(|n| u32::try_from(n).ok())
            .and_then(Self::new)
            .unwrap_or_default()
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self(DEFAULT_SIZE)
    }
}

impl TryFrom<u32> for Size {
    type Error = String;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n).ok_or_else(|| format!("size {n} exceeds maximum {MAX_SIZE}"))
    }
}

impl From<Size> for u32 {
    fn from(size: Size) -> Self {
        size.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
