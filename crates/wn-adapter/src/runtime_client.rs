//! Shells out to the external container runtime's CLI to deploy and destroy
//! a rendered topology, and to discover the namespace handle for a given
//! node once it is running. The runtime's own semantics (image pulls,
//! veth creation) are out of scope; this module only needs its command
//! surface (spec §4.7, §1 out-of-scope collaborators).

use std::process::Output;

use tokio::process::Command;
use tracing::debug;

use crate::descriptor::RuntimeDescriptor;
use crate::error::AdapterError;
use crate::namespace::NamespaceHandle;

/// Thin wrapper around a container runtime CLI binary (e.g. `containerlab`,
/// `clab`, or an internal equivalent) that accepts a topology file and
/// `deploy`/`destroy` subcommands, and can report a running node's PID.
pub struct RuntimeClient {
    binary: String,
}

impl RuntimeClient {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    async fn run(&self, args: &[String]) -> Result<Output, AdapterError> {
        debug!(binary = %self.binary, ?args, "running container runtime command");
        Ok(Command::new(&self.binary).args(args).output().await?)
    }

    /// Writes the descriptor to `topology_path` and invokes the runtime's
    /// deploy command against it.
    pub async fn deploy(&self, descriptor: &RuntimeDescriptor, topology_path: &str) -> Result<(), AdapterError> {
        let yaml = crate::descriptor::to_yaml(descriptor)?;
        tokio::fs::write(topology_path, yaml).await?;

        let args = vec!["deploy".to_string(), "--topo".into(), topology_path.to_string()];
        let output = self.run(&args).await?;
        if !output.status.success() {
            return Err(AdapterError::DeployFailed(String::from_utf8_lossy(&output.stderr).to_string()));
        }
        Ok(())
    }

    pub async fn destroy(&self, topology_path: &str) -> Result<(), AdapterError> {
        let args = vec!["destroy".to_string(), "--topo".into(), topology_path.to_string()];
        let output = self.run(&args).await?;
        if !output.status.success() {
            return Err(AdapterError::DestroyFailed(String::from_utf8_lossy(&output.stderr).to_string()));
        }
        Ok(())
    }

    /// Asks the runtime for the namespace handle (here: the container's
    /// main PID, used as `/proc/<pid>/ns/net`) backing `node`.
    pub async fn discover_namespace(&self, node: &str) -> Result<NamespaceHandle, AdapterError> {
        let args = vec!["inspect".to_string(), "--format".into(), "{{.Pid}}".into(), node.to_string()];
        let output = self.run(&args).await?;
        if !output.status.success() {
            return Err(AdapterError::DiscoveryFailed(node.to_string(), String::new(), String::from_utf8_lossy(&output.stderr).to_string()));
        }
        let pid = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(pid)
    }
}
