use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use fibsvc_core::FibError;

use crate::protocol::{ErrorBody, HealthResponse};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("self-check failed for {service}")]
    Unhealthy { service: String },

    #[error(transparent)]
    Compute(#[from] FibError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unhealthy { service } => {
                error!(%service, "health self-check failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(HealthResponse::unhealthy(&service)),
                )
                    .into_response()
            }
            Self::Compute(e) => {
                error!("request failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: e.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
