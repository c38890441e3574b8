mod lru_cache;
mod map_cache;

pub use lru_cache::{LruCache, DEFAULT_CAPACITY};
pub use map_cache::MapCache;
