use crate::error::TcError;
use std::collections::HashSet;
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// Runs `tc`/`ip` inside a target namespace via `ip netns exec`, refusing
/// to touch interfaces this instance doesn't own. The driver itself holds
/// no qdisc state — every apply is idempotent (delete-then-recreate).
pub struct TcManager {
    owned_interfaces: HashSet<String>,
}

impl TcManager {
    pub fn new(owned_interfaces: impl IntoIterator<Item = String>) -> Self {
        Self { owned_interfaces: owned_interfaces.into_iter().collect() }
    }

    pub fn owns(&self, interface: &str) -> bool {
        interface != "lo" && self.owned_interfaces.contains(interface)
    }

    pub(crate) fn check_owned(&self, interface: &str) -> Result<(), TcError> {
        if self.owns(interface) {
            Ok(())
        } else {
            Err(TcError::InterfaceNotOwned(interface.to_string()))
        }
    }

    async fn run(&self, namespace: &str, program: &str, args: &[String]) -> Result<Output, TcError> {
        debug!(namespace, program, ?args, "running tc/ip");
        let output = Command::new("ip")
            .arg("netns")
            .arg("exec")
            .arg(namespace)
            .arg(program)
            .args(args)
            .output()
            .await?;
        Ok(output)
    }

    pub(crate) async fn tc(&self, namespace: &str, args: &[String]) -> Result<Output, TcError> {
        self.run(namespace, "tc", args).await
    }

    pub(crate) fn classify_failure(stderr: &str, interface: &str) -> TcError {
        if stderr.contains("Operation not permitted") {
            TcError::PermissionDenied
        } else if stderr.contains("Cannot find device") {
            TcError::InterfaceNotFound(interface.to_string())
        } else {
            TcError::CommandFailed(stderr.to_string())
        }
    }

    /// Deletes the root qdisc on `interface`, ignoring "no qdisc to delete"
    /// failures (the common case on first apply).
    pub async fn delete_root_qdisc(&self, namespace: &str, interface: &str) -> Result<(), TcError> {
        self.check_owned(interface)?;
        let args = vec!["qdisc".into(), "del".into(), "dev".into(), interface.into(), "root".into()];
        let _ = self.tc(namespace, &args).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_loopback_and_unowned_interfaces() {
        let manager = TcManager::new(["veth0".to_string()]);
        assert!(manager.check_owned("lo").is_err());
        assert!(manager.check_owned("eth99").is_err());
        assert!(manager.check_owned("veth0").is_ok());
    }
}
