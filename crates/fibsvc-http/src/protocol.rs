use serde::{Deserialize, Serialize};

use fibsvc_core::{CacheStats, StatsSnapshot, Strategy};

// ---------------------------------------------------------------------------
// /health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_result: Option<u64>,
}

impl HealthResponse {
    pub fn healthy(service: &str, test_result: u64) -> Self {
        Self {
            status: "healthy".into(),
            service: service.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            test_result: Some(test_result),
        }
    }

    pub fn unhealthy(service: &str) -> Self {
        Self {
            status: "unhealthy".into(),
            service: service.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            test_result: None,
        }
    }
}

// ---------------------------------------------------------------------------
// /
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub strategy: Strategy,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub compute: &'static str,
    pub health: &'static str,
    pub stats: &'static str,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            compute: "/compute?size=30",
            health: "/health",
            stats: "/stats",
        }
    }
}

// ---------------------------------------------------------------------------
// /stats
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub service: String,
    pub strategy: Strategy,
    #[serde(flatten)]
    pub counters: StatsSnapshot,
    pub cache: Option<CacheReport>,
}

#[derive(Debug, Serialize)]
pub struct CacheReport {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheReport {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
