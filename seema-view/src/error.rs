//! Error types for seema-view.

use thiserror::Error;

/// Seema-view error type.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] seema_geo::SeemaError),
}

impl From<toml::de::Error> for ViewError {
    fn from(e: toml::de::Error) -> Self {
        ViewError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ViewError>;
