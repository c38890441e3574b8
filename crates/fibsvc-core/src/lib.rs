pub mod cache;
pub mod compute;
pub mod error;
pub mod fibonacci;
pub mod size;
pub mod stats;

pub use cache::{CacheStats, FibCache};
pub use compute::{ComputeResponse, ComputeService};
pub use error::{FibError, FibResult};
pub use fibonacci::Strategy;
pub use size::{Size, DEFAULT_SIZE, MAX_SIZE};
pub use stats::{ServiceStats, StatsSnapshot};
