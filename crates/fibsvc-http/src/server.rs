use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::shutdown::wait_for_shutdown;

/// Bind `addr` and serve until Ctrl+C or SIGTERM. In-flight requests are
/// allowed to finish before this returns.
pub async fn serve(addr: SocketAddr, router: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!("HTTP server bound on {local}");
    info!("Endpoint: http://{local}/compute?size=30");
    info!("Health:   http://{local}/health");

    serve_with_shutdown(listener, router, async {
        if let Err(e) = wait_for_shutdown().await {
            error!("signal handling failed, shutting down: {e}");
        }
    })
    .await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("HTTP server shutting down gracefully");
        })
        .await?;
    info!("HTTP server stopped");
    Ok(())
}
