//! Error types for livetagger

use thiserror::Error;

/// Main error type for livetagger
#[derive(Debug, Error)]
pub enum LiveTaggerError {
    #[error("Malformed metadata document: {0}")]
    MalformedDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Invalid include pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Failed to serialize metadata: {0}")]
    Serialize(String),

    #[error("{0} folder(s) could not be processed")]
    FoldersFailed(usize),
}

impl LiveTaggerError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LiveTaggerError::Config(_)
            | LiveTaggerError::TomlDeserialize(_)
            | LiveTaggerError::InvalidPattern(_)
            | LiveTaggerError::InvalidTag(_) => 2,
            _ => 1,
        }
    }
}

/// Result type using LiveTaggerError
pub type Result<T> = std::result::Result<T, LiveTaggerError>;
