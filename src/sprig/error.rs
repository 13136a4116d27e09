use crate::identify::IdentifyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SprigError {
    #[error("Plant not found: {0}")]
    PlantNotFound(String),

    #[error("Invalid frequency: {0} (must be at least 1)")]
    InvalidFrequency(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Identification failed: {0}")]
    Identify(#[from] IdentifyError),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SprigError>;
