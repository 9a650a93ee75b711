//! The serve loop shared by both services.

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

/// Run a router on the given listener until the shutdown signal fires.
///
/// In-flight requests are drained before the future resolves.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    tracing::info!(address = %addr, "HTTP server stopped");
    Ok(())
}
