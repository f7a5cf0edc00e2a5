//! Chat API server lifecycle — bind, serve, shut down on ctrl-c.

use std::net::SocketAddr;

use super::{routes, ApiContext};

/// Bind and serve the chat API until a shutdown signal arrives.
pub async fn serve(addr: SocketAddr, ctx: ApiContext) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "chat API listening");

    let app = routes::chat_router(ctx);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
