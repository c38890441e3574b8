use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct CorsOptions {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".into()],
        }
    }
}

/// Build the CORS layer for the read-only surface (`GET`, `OPTIONS`).
/// Returns `None` when disabled or when no configured origin is usable.
pub fn build_cors_layer(opts: &CorsOptions) -> Option<CorsLayer> {
    if !opts.enabled {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if opts.allowed_origins.iter().any(|o| o == "*") {
        return Some(layer.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = opts
        .allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        warn!("CORS enabled but no valid origins configured; layer disabled");
        return None;
    }
    Some(layer.allow_origin(origins))
}
