use crate::error::{GatewayError, GatewayResult};

/// Gateway connection settings.
///
/// All four values are mandatory: the gateway rejects unsigned requests, so
/// an empty credential would only fail later with an opaque authentication
/// error. `validate` runs at client construction and reports every missing
/// value at once.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway, e.g. `https://apijkn.example.go.id/vclaim-rest`.
    pub base_url: String,
    /// Consumer identifier issued by the gateway operator (`X-cons-id`).
    pub consumer_id: String,
    /// Shared secret keying the request signature.
    pub consumer_secret: String,
    /// Static application key (`user_key` header).
    pub user_key: String,
}

impl GatewayConfig {
    pub fn new(
        base_url: impl Into<String>,
        consumer_id: impl Into<String>,
        consumer_secret: impl Into<String>,
        user_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            consumer_id: consumer_id.into(),
            consumer_secret: consumer_secret.into(),
            user_key: user_key.into(),
        }
    }

    /// Load settings from `BPJS_BASE_URL`, `BPJS_CONS_ID`, `BPJS_CONS_SECRET`
    /// and `BPJS_USER_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` naming every variable that is unset or
    /// empty.
    pub fn from_env() -> GatewayResult<Self> {
        let config = Self {
            base_url: std::env::var("BPJS_BASE_URL").unwrap_or_default(),
            consumer_id: std::env::var("BPJS_CONS_ID").unwrap_or_default(),
            consumer_secret: std::env::var("BPJS_CONS_SECRET").unwrap_or_default(),
            user_key: std::env::var("BPJS_USER_KEY").unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject empty settings, listing all of them in one error.
    pub fn validate(&self) -> GatewayResult<()> {
        let mut missing = Vec::new();
        if self.base_url.trim().is_empty() {
            missing.push("BPJS_BASE_URL");
        }
        if self.consumer_id.trim().is_empty() {
            missing.push("BPJS_CONS_ID");
        }
        if self.consumer_secret.trim().is_empty() {
            missing.push("BPJS_CONS_SECRET");
        }
        if self.user_key.trim().is_empty() {
            missing.push("BPJS_USER_KEY");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GatewayError::Config(format!(
                "missing insurance gateway settings: {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_config_validates() {
        let config = GatewayConfig::new("https://gw.example.test", "cons-1", "secret", "key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_names_every_missing_value() {
        let config = GatewayConfig::new("https://gw.example.test", "", " ", "key");
        let err = match config.validate() {
            Err(e) => e.to_string(),
            Ok(()) => panic!("empty credentials must not validate"),
        };
        assert!(err.contains("BPJS_CONS_ID"));
        assert!(err.contains("BPJS_CONS_SECRET"));
        assert!(!err.contains("BPJS_BASE_URL"));
        assert!(!err.contains("BPJS_USER_KEY"));
    }
}
