//! Error types for code generation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("schema unit is required")]
    MissingUnit,

    #[error("schema unit not found: {0}")]
    UnitNotFound(String),

    #[error("invalid generator parameter '{key}': {message}")]
    InvalidParameter { key: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_parameter(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            key: key.into(),
            message: message.into(),
        }
    }
}
