#[derive(Debug, thiserror::Error)]
pub enum BrandError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("failed to create database directory: {0}")]
    DatabaseDirCreation(std::io::Error),
    #[error("project store is unavailable (connection lock poisoned)")]
    StoreUnavailable,

    #[error("failed to build AI client: {0}")]
    AiClientSetup(reqwest::Error),

    #[error("failed to serialize element content: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize element content: {0}")]
    Deserialization(serde_json::Error),
    #[error("unknown element type: {0}")]
    UnknownElementType(String),
    #[error("unknown compliance status: {0}")]
    UnknownComplianceStatus(String),
}

pub type BrandResult<T> = std::result::Result<T, BrandError>;
