use thiserror::Error;

/// Driver-level errors. Anything surfacing as a `VibeError` aborts the run.
#[derive(Debug, Error)]
pub enum VibeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid target: {0}")]
    Target(String),
}

/// Result type alias for vibe-test operations
pub type VibeResult<T> = Result<T, VibeError>;
