use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fibsvc_core::ComputeService;

use crate::handlers;

/// Wall-clock seconds spent on the whole request, including serialization.
pub const PROCESS_TIME_HEADER: HeaderName = HeaderName::from_static("x-process-time");

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ComputeService>,
    pub service_name: Arc<str>,
    pub version: &'static str,
}

impl AppState {
    pub fn new(service: Arc<ComputeService>, service_name: &str) -> Self {
        Self {
            service,
            service_name: Arc::from(service_name),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

pub fn build_router(state: AppState, cors: Option<CorsLayer>) -> Router {
    let router = Router::new()
        .route("/", get(handlers::root))
        .route("/compute", get(handlers::compute))
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(middleware::from_fn(process_time))
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(layer) => router.layer(layer),
        None => router,
    }
}

async fn process_time(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let mut response = next.run(req).await;
    let secs = start.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&format!("{secs:.6}")) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }
    response
}
