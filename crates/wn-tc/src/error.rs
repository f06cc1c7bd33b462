use thiserror::Error;

#[derive(Debug, Error)]
pub enum TcError {
    #[error("interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("refusing to manage interface '{0}': not owned by this topology")]
    InterfaceNotOwned(String),

    #[error("permission denied (requires CAP_NET_ADMIN / root)")]
    PermissionDenied,

    #[error("tc/ip command failed: {0}")]
    CommandFailed(String),

    #[error("failed to spawn tc/ip: {0}")]
    Spawn(#[from] std::io::Error),
}
