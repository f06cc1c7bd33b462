//! Implementations of the CLI subcommands, extracted from `main.rs` so each
//! one stays independently testable.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use wn_channel_service::ChannelServiceClient;
use wn_controller::{build_router, cleanup, Controller};
use wn_types::{builder::{TopologyBuilder, WirelessInterfaceBuilder}, mcs::{FecType, Modulation, ModulationConfig}, Position, Topology};

use crate::error::CliError;

fn default_channel_service_url() -> String {
    std::env::var("WN_CHANNEL_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:7600".to_string())
}

fn default_runtime_binary() -> String {
    std::env::var("WN_RUNTIME_BINARY").unwrap_or_else(|_| "docker-compose".to_string())
}

pub async fn cmd_deploy(topology_path: &str, enable_mobility: bool) -> Result<(), CliError> {
    let topology = Topology::load_and_validate(topology_path)?;
    let channel = ChannelServiceClient::new(default_channel_service_url());
    let mut controller = Controller::new(topology, topology_path.to_string(), channel, default_runtime_binary());

    let summary = controller.deploy().await?;
    println!("{}", serde_json::to_string_pretty(&summary).map_err(|e| CliError::Other(e.to_string()))?);
    info!(links = summary.links.len(), warnings = summary.warnings.len(), "deploy complete");

    if !enable_mobility {
        return Ok(());
    }

    let controller = Arc::new(Mutex::new(controller));
    cleanup::register(controller.clone());

    let metrics = wn_observability::install_recorder().map_err(|e| CliError::Other(e.to_string()))?;
    let state = wn_controller::MobilityState(controller);
    let app = build_router(state, metrics);

    let addr: SocketAddr = std::env::var("WN_CONTROLLER_LISTEN_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:7700".to_string())
        .parse()
        .map_err(|e: std::net::AddrParseError| CliError::Other(e.to_string()))?;
    info!(%addr, "serving mobility API");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| CliError::Other(e.to_string()))?;
    axum::serve(listener, app).await.map_err(|e| CliError::Other(e.to_string()))?;

    Ok(())
}

pub async fn cmd_destroy(topology_path: &str) -> Result<(), CliError> {
    let topology = Topology::load_and_validate(topology_path)?;
    let channel = ChannelServiceClient::new(default_channel_service_url());
    let mut controller = Controller::new(topology, topology_path.to_string(), channel, default_runtime_binary());
    controller.force_destroy().await?;
    info!("destroy complete");
    Ok(())
}

pub fn cmd_validate(topology_path: &str) -> Result<(), CliError> {
    let topology = Topology::load_and_validate(topology_path)?;
    println!("{} nodes, {} links: valid", topology.nodes.len(), topology.links.len());
    Ok(())
}

pub async fn cmd_status(controller_url: &str) -> Result<(), CliError> {
    let url = format!("{controller_url}/nodes");
    let response = reqwest::get(&url).await.map_err(|e| CliError::Other(e.to_string()))?;
    let body: serde_json::Value = response.json().await.map_err(|e| CliError::Other(e.to_string()))?;
    println!("{}", serde_json::to_string_pretty(&body).map_err(|e| CliError::Other(e.to_string()))?);
    Ok(())
}

pub async fn cmd_channel_server(worker_binary: &str) -> Result<(), CliError> {
    let state = wn_channel_service::ServiceState::new(worker_binary.to_string());
    let metrics = wn_observability::install_recorder().map_err(|e| CliError::Other(e.to_string()))?;
    let app = wn_channel_service::build_router(state, metrics);

    let addr: SocketAddr = std::env::var("WN_CHANNEL_LISTEN_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:7600".to_string())
        .parse()
        .map_err(|e: std::net::AddrParseError| CliError::Other(e.to_string()))?;
    info!(%addr, "wn-channel-service listening");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| CliError::Other(e.to_string()))?;
    axum::serve(listener, app).await.map_err(|e| CliError::Other(e.to_string()))?;

    Ok(())
}

/// Synthesizes the two-node free-space scenario from the testable-properties
/// table and prints it as YAML, so a user can see a valid descriptor without
/// hand-writing one.
pub fn cmd_info() -> Result<(), CliError> {
    let a = WirelessInterfaceBuilder::new(Position::new(0.0, 0.0, 1.0), 5.18, 80.0)
        .modulation(ModulationConfig::Fixed { modulation: Modulation::Qam64, fec_code_rate: 0.5, fec_type: FecType::Ldpc })
        .build();
    let b = WirelessInterfaceBuilder::new(Position::new(20.0, 0.0, 1.0), 5.18, 80.0)
        .modulation(ModulationConfig::Fixed { modulation: Modulation::Qam64, fec_code_rate: 0.5, fec_type: FecType::Ldpc })
        .build();
    let topology = TopologyBuilder::new("example-free-space")
        .add_node("a", "alpine", a, "wlan0")
        .add_node("b", "alpine", b, "wlan0")
        .add_link("ab", ("a", "wlan0"), ("b", "wlan0"))
        .build();

    let yaml = serde_yaml::to_string(&topology).map_err(|e| CliError::Other(e.to_string()))?;
    print!("{yaml}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_prints_a_valid_topology() {
        assert!(cmd_info().is_ok());
    }

    #[test]
    fn validate_rejects_a_missing_file() {
        assert!(cmd_validate("/nonexistent/path/to/topology.yaml").is_err());
    }
}
