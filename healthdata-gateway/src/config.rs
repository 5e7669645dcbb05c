use crate::error::{HealthDataError, HealthDataResult};

/// Seconds before measured expiry at which a cached token is refreshed.
pub const DEFAULT_TOKEN_SKEW_SECONDS: i64 = 60;

/// Health-data platform connection settings.
#[derive(Debug, Clone)]
pub struct HealthDataConfig {
    /// FHIR base URL, e.g. `https://api-satusehat.example.go.id/fhir-r4/v1`.
    pub base_url: String,
    /// OAuth base URL, e.g. `https://api-satusehat.example.go.id/oauth2/v1`.
    pub auth_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Refresh window before token expiry.
    pub token_skew_seconds: i64,
}

impl HealthDataConfig {
    pub fn new(
        base_url: impl Into<String>,
        auth_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            auth_url: auth_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_skew_seconds: DEFAULT_TOKEN_SKEW_SECONDS,
        }
    }

    /// Load settings from `HEALTHDATA_BASE_URL`, `HEALTHDATA_AUTH_URL`,
    /// `HEALTHDATA_CLIENT_ID`, `HEALTHDATA_CLIENT_SECRET` and the optional
    /// `HEALTHDATA_TOKEN_SKEW` (seconds).
    ///
    /// # Errors
    ///
    /// Returns `HealthDataError::Config` naming every variable that is unset
    /// or empty.
    pub fn from_env() -> HealthDataResult<Self> {
        let token_skew_seconds = std::env::var("HEALTHDATA_TOKEN_SKEW")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_SKEW_SECONDS);

        let config = Self {
            base_url: std::env::var("HEALTHDATA_BASE_URL").unwrap_or_default(),
            auth_url: std::env::var("HEALTHDATA_AUTH_URL").unwrap_or_default(),
            client_id: std::env::var("HEALTHDATA_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("HEALTHDATA_CLIENT_SECRET").unwrap_or_default(),
            token_skew_seconds,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> HealthDataResult<()> {
        let mut missing = Vec::new();
        if self.base_url.trim().is_empty() {
            missing.push("HEALTHDATA_BASE_URL");
        }
        if self.auth_url.trim().is_empty() {
            missing.push("HEALTHDATA_AUTH_URL");
        }
        if self.client_id.trim().is_empty() {
            missing.push("HEALTHDATA_CLIENT_ID");
        }
        if self.client_secret.trim().is_empty() {
            missing.push("HEALTHDATA_CLIENT_SECRET");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(HealthDataError::Config(format!(
                "missing health-data platform settings: {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_names_every_missing_value() {
        let config = HealthDataConfig::new("https://hd.example.test/fhir", "", "", "secret");
        let err = match config.validate() {
            Err(e) => e.to_string(),
            Ok(()) => panic!("empty credentials must not validate"),
        };
        assert!(err.contains("HEALTHDATA_AUTH_URL"));
        assert!(err.contains("HEALTHDATA_CLIENT_ID"));
        assert!(!err.contains("HEALTHDATA_CLIENT_SECRET"));
    }
}
