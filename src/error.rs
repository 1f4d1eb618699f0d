use std::path::PathBuf;

/// Errors raised at the edges of the engine. The frame path itself never fails;
/// out-of-range input there is clamped instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("object id `{0}` already exists in the scene")]
    DuplicateObjectId(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
