use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx HTTP status from the gateway.
    #[error("gateway returned HTTP {status}: {reason}")]
    Transport { status: u16, reason: String },

    /// 2xx HTTP status but the envelope code signals a business failure.
    /// Display is the gateway's message verbatim so it can be shown to an
    /// operator unchanged.
    #[error("{message}")]
    Domain { code: String, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Success envelope whose payload is missing or not in the documented shape.
    #[error("Malformed gateway response: {0}")]
    Malformed(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// True for failures reported by the gateway's business layer rather
    /// than the transport underneath it.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
}
