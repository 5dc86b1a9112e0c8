use crate::domain::model::PointId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripError {
    #[error("Point not found: {id}")]
    PointNotFound { id: PointId },

    #[error("Point already exists: {id}")]
    DuplicatePoint { id: PointId },

    #[error("No rendered row for point: {id}")]
    RowNotFound { id: PointId },

    #[error("View node not found: {node}")]
    NodeNotFound { node: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl TripError {
    /// Whether the error came from the store rejecting a mutation.
    pub fn is_store_rejection(&self) -> bool {
        matches!(
            self,
            TripError::PointNotFound { .. } | TripError::DuplicatePoint { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TripError>;
