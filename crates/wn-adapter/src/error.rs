use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("unknown interface '{0}.{1}'")]
    UnknownInterface(String, String),

    #[error("no namespace handle registered for '{0}.{1}'")]
    NamespaceNotFound(String, String),

    #[error("no interface alias registered for ({0}, peer {1})")]
    AliasNotFound(String, String),

    #[error("runtime deploy command failed: {0}")]
    DeployFailed(String),

    #[error("runtime destroy command failed: {0}")]
    DestroyFailed(String),

    #[error("runtime namespace discovery failed for '{0}.{1}': {2}")]
    DiscoveryFailed(String, String, String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("descriptor serialization failed: {0}")]
    Descriptor(#[from] serde_yaml::Error),
}
