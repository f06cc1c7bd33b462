//! Channel service entry point.

use std::net::SocketAddr;

use wn_channel_service::{build_router, ServiceState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wn_observability::init_tracing(true);
    let metrics = wn_observability::install_recorder()?;

    let worker_command = std::env::var("WN_RAYTRACE_WORKER").unwrap_or_else(|_| "wn-raytrace-worker".to_string());
    let state = ServiceState::new(worker_command);
    let app = build_router(state, metrics);

    let addr: SocketAddr = std::env::var("WN_CHANNEL_LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:7600".to_string()).parse()?;

    tracing::info!(%addr, "wn-channel-service listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
