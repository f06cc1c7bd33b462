//! Controller entry point: deploys a topology, then serves the mobility
//! HTTP API until interrupted.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Mutex;

use wn_channel_service::ChannelServiceClient;
use wn_controller::{build_router, cleanup, Controller, MobilityState};
use wn_types::Topology;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wn_observability::init_tracing(true);
    let metrics = wn_observability::install_recorder()?;

    let topology_path = std::env::var("WN_TOPOLOGY_PATH").unwrap_or_else(|_| "topology.yaml".to_string());
    let channel_url = std::env::var("WN_CHANNEL_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:7600".to_string());
    let runtime_binary = std::env::var("WN_RUNTIME_BINARY").unwrap_or_else(|_| "docker-compose".to_string());

    let topology = Topology::load_and_validate(&topology_path)?;
    let channel = ChannelServiceClient::new(channel_url);
    let controller = Arc::new(Mutex::new(Controller::new(topology, topology_path.clone(), channel, runtime_binary)));

    {
        let mut guard = controller.lock().await;
        let summary = guard.deploy().await?;
        tracing::info!(links = summary.links.len(), warnings = summary.warnings.len(), "deploy complete");
    }

    cleanup::register(controller.clone());

    let state = MobilityState(controller);
    let app = build_router(state, metrics);

    let addr: SocketAddr = std::env::var("WN_CONTROLLER_LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:7700".to_string()).parse()?;
    tracing::info!(%addr, "wn-controller listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
