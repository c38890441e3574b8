//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `--config <path>` flag
//! 2. `$FIBSVC_CONFIG` environment variable
//! 3. `~/.config/fibsvc/config.toml`
//! 4. Built-in defaults (everything is optional)

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use fibsvc_cache::{LruCache, MapCache, DEFAULT_CAPACITY};
use fibsvc_core::{FibCache, Strategy};
use fibsvc_http::CorsOptions;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub compute: ComputeConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
}

/// Listener settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Reported by `/health` and `/`.
    pub service_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ComputeConfig {
    pub strategy: Strategy,
}

/// Memo table settings. Only used by the memoized and hybrid strategies.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub kind: CacheKind,
    /// LRU capacity; ignored by the map cache.
    pub capacity: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    #[default]
    Map,
    Lru,
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map => write!(f, "map"),
            Self::Lru => write!(f, "lru"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
}

// --- Defaults ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 8080,
            service_name: "rust-api".into(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            kind: CacheKind::Map,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".into()],
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.bind))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl CacheConfig {
    /// Build the memo table for `strategy`, or `None` if it does not use one.
    pub fn build(&self, strategy: Strategy) -> Result<Option<Arc<dyn FibCache>>> {
        if !strategy.uses_cache() {
            return Ok(None);
        }
        let cache: Arc<dyn FibCache> = match self.kind {
            CacheKind::Map => Arc::new(MapCache::new()),
            CacheKind::Lru => Arc::new(LruCache::new(self.capacity)?),
        };
        Ok(Some(cache))
    }
}

impl From<&CorsConfig> for CorsOptions {
    fn from(cfg: &CorsConfig) -> Self {
        Self {
            enabled: cfg.enabled,
            allowed_origins: cfg.allowed_origins.clone(),
        }
    }
}

/// Load config from disk. Returns defaults if no config file exists.
///
/// An explicitly requested file must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        return read_config(p);
    }

    if let Some(p) = config_path(None) {
        if p.exists() {
            return read_config(&p);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Resolve the config file path.
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }

    if let Ok(p) = std::env::var("FIBSVC_CONFIG") {
        return Some(PathBuf::from(p));
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("fibsvc").join("config.toml"))
}

/// Show the active config path (for `fibsvc config`).
pub fn show_config_path(explicit: Option<&Path>) -> String {
    match config_path(explicit) {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}
