use thiserror::Error;

/// Static validation failures, fatal at load. Corresponds to `topology_error`
/// in the error taxonomy.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("duplicate node name: {0}")]
    DuplicateNode(String),

    #[error("duplicate IP address {ip} assigned to both {first} and {second}")]
    IpConflict { ip: String, first: String, second: String },

    #[error("shared bridge '{bridge}' includes non-wireless participant {node}.{interface}")]
    SharedBridgeNonWireless { bridge: String, node: String, interface: String },

    #[error("shared bridge '{bridge}' participant {node}.{interface} has no ip_address")]
    SharedBridgeMissingIp { bridge: String, node: String, interface: String },

    #[error("mixed MAC models on frequency {frequency_hz} Hz: {first_kind} and {second_kind}")]
    MixedMacModels { frequency_hz: f64, first_kind: String, second_kind: String },

    #[error("antenna mutual-exclusion violated for {context}: {reason}")]
    AntennaMutualExclusion { context: String, reason: String },

    #[error("links and shared_bridge are mutually exclusive")]
    LinksAndSharedBridgeBothSet,

    #[error("link '{0}' references unknown endpoint {1}.{2}")]
    UnknownEndpoint(String, String, String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("unknown MCS table reference: {0}")]
    UnknownMcsTable(String),

    #[error("failed to parse topology YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read topology file {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },
}
