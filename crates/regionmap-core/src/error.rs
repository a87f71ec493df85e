pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("Invalid config YAML: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),

    #[error("Invalid marker group input: {message}")]
    InvalidInput { message: String },
}

/// Why a single node could not be resolved.
///
/// Node errors never abort a batch: the normalizer drops the node, logs the reason and keeps
/// going with the rest of the group.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeError {
    #[error("unknown region: {code}")]
    UnknownRegion { code: String },

    #[error("invalid coordinates: {message}")]
    InvalidCoordinates { message: String },

    #[error("invalid node format: {message}")]
    InvalidFormat { message: String },
}
