use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use fibsvc_core::compute::SELF_CHECK_EXPECTED;

use crate::error::ApiError;
use crate::protocol::{Endpoints, ErrorBody, HealthResponse, ServiceInfo, StatsResponse};
use crate::router::AppState;

/// `GET /compute?size=<int>`. The query is taken as a plain string map so
/// malformed values fall through to the default size instead of a 400.
pub async fn compute(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let resp = state.service.compute(params.get("size").map(String::as_str));
    let body = resp.to_json()?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    if !state.service.self_check() {
        return Err(ApiError::Unhealthy {
            service: state.service_name.to_string(),
        });
    }
    Ok(Json(HealthResponse::healthy(
        &state.service_name,
        SELF_CHECK_EXPECTED,
    )))
}

pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: state.service_name.to_string(),
        version: state.version.to_string(),
        strategy: state.service.strategy(),
        endpoints: Endpoints::default(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        service: state.service_name.to_string(),
        strategy: state.service.strategy(),
        counters: state.service.stats(),
        cache: state.service.cache_stats().map(Into::into),
    })
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "not found".into(),
        }),
    )
}
