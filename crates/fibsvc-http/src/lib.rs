//! HTTP surface of the compute service: `/compute`, `/health`, `/stats` and
//! the `/` metadata document.

mod cors;
mod error;
mod handlers;
pub mod protocol;
mod router;
mod server;
mod shutdown;

pub use cors::{build_cors_layer, CorsOptions};
pub use error::ApiError;
pub use router::{build_router, AppState, PROCESS_TIME_HEADER};
pub use server::{serve, serve_with_shutdown};
pub use shutdown::wait_for_shutdown;
