use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::HealthDataConfig;
use crate::error::{HealthDataError, HealthDataResult};
use crate::models::{Bundle, PatientRecord, PersonResource, PractitionerRecord, TokenResponse};
use crate::token::TokenCache;

/// NIK identifier system used by the national platform.
const NIK_SYSTEM: &str = "https://fhir.kemkes.go.id/id/nik";

/// Client for the national health-data platform.
pub struct HealthDataClient {
    client: reqwest::Client,
    config: HealthDataConfig,
    tokens: TokenCache,
}

impl HealthDataClient {
    /// Create a client over validated settings with an empty token cache.
    ///
    /// # Errors
    ///
    /// Returns `HealthDataError::Config` when any setting is empty.
    pub fn new(config: HealthDataConfig) -> HealthDataResult<Self> {
        let tokens = TokenCache::new(config.token_skew_seconds);
        Self::with_token_cache(config, tokens)
    }

    /// Create a client with a caller-supplied token cache. Tests use this to
    /// seed a pre-valid or pre-expired token.
    pub fn with_token_cache(
        config: HealthDataConfig,
        tokens: TokenCache,
    ) -> HealthDataResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            config: HealthDataConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                auth_url: config.auth_url.trim_end_matches('/').to_string(),
                ..config
            },
            tokens,
        })
    }

    /// The cached access token, refreshed when absent or within the skew
    /// window of expiry. The cache lock is released before the refresh
    /// request is sent, so concurrent callers may refresh twice; the
    /// duplicate fetch is accepted.
    pub async fn valid_token(&self) -> HealthDataResult<String> {
        if let Some(token) = self.tokens.current().await {
            return Ok(token);
        }
        self.refresh_token().await
    }

    async fn refresh_token(&self) -> HealthDataResult<String> {
        debug!("refreshing health-data platform access token");

        let url = format!(
            "{}/accesstoken?grant_type=client_credentials",
            self.config.auth_url
        );
        let response = self
            .client
            .post(&url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HealthDataError::Transport {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        self.tokens
            .store(token.access_token.clone(), token.expires_in)
            .await;

        Ok(token.access_token)
    }

    /// Authenticated GET returning a decoded FHIR body. A 401 clears the
    /// cached token and is surfaced as `Auth`; the caller decides whether to
    /// retry, nothing is retried here.
    async fn get_resource<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> HealthDataResult<T> {
        let token = self.valid_token().await?;
        let url = format!("{}/{}", self.config.base_url, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.tokens.clear().await;
            return Err(HealthDataError::Auth(
                "platform rejected the access token".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(HealthDataError::Transport {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Look up a patient by NIK. An empty search bundle is `None`.
    pub async fn patient_by_nik(&self, nik: &str) -> HealthDataResult<Option<PatientRecord>> {
        debug!(nik, "looking up patient on the national platform");

        let bundle: Bundle<PersonResource> = self
            .get_resource("Patient", &[("identifier", format!("{NIK_SYSTEM}|{nik}"))])
            .await?;

        Ok(bundle
            .entry
            .into_iter()
            .next()
            .map(|entry| PatientRecord::from(entry.resource)))
    }

    /// Look up a practitioner by NIK. An empty search bundle is `None`.
    pub async fn practitioner_by_nik(
        &self,
        nik: &str,
    ) -> HealthDataResult<Option<PractitionerRecord>> {
        debug!(nik, "looking up practitioner on the national platform");

        let bundle: Bundle<PersonResource> = self
            .get_resource(
                "Practitioner",
                &[("identifier", format!("{NIK_SYSTEM}|{nik}"))],
            )
            .await?;

        Ok(bundle
            .entry
            .into_iter()
            .next()
            .map(|entry| PractitionerRecord::from(entry.resource)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_empty_settings() {
        let config = HealthDataConfig::new("https://hd.example.test/fhir", "", "id", "secret");
        assert!(matches!(
            HealthDataClient::new(config),
            Err(HealthDataError::Config(_))
        ));
    }
}
