use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutAdsError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Creative source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Creative not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<std::io::Error> for ScoutAdsError {
    fn from(e: std::io::Error) -> Self {
        ScoutAdsError::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScoutAdsError>;
