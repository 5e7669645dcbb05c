use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthDataError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The platform rejected our access token.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Non-2xx HTTP status from the platform.
    #[error("health-data platform returned HTTP {status}: {reason}")]
    Transport { status: u16, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed platform response: {0}")]
    Malformed(String),
}

pub type HealthDataResult<T> = Result<T, HealthDataError>;
