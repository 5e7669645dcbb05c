use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{
    Envelope, Peserta, PesertaPayload, ReferenceItem, ReferenceKind, ReferencePayload, Sep,
    SepPayload, SepRequest,
};
use crate::signing;

/// The only envelope code the gateway defines as success.
const SUCCESS_CODE: &str = "200";

/// Client for the national insurance gateway.
///
/// Stateless: each operation is a single signed request/response exchange.
/// Timestamps and signatures are regenerated per call and never reused.
pub struct InsuranceGatewayClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl InsuranceGatewayClient {
    /// Create a client over validated settings.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` when any setting is empty, so a
    /// misconfigured deployment fails at startup instead of sending
    /// unauthenticated requests.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            config: GatewayConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// Attach the gateway's mandated auth headers. The timestamp and the
    /// signature bound to it are fresh on every call.
    fn signed(&self, request: reqwest::RequestBuilder) -> GatewayResult<reqwest::RequestBuilder> {
        let timestamp = signing::unix_timestamp();
        let signature =
            signing::signature(&self.config.consumer_id, &self.config.consumer_secret, timestamp)?;

        Ok(request
            .header("X-cons-id", &self.config.consumer_id)
            .header("X-timestamp", timestamp.to_string())
            .header("X-signature", signature)
            .header("user_key", &self.config.user_key))
    }

    /// Send a signed request and decode the gateway envelope.
    ///
    /// Non-2xx HTTP status becomes `Transport`; a 2xx response whose
    /// envelope code is not `"200"` becomes `Domain` carrying the gateway's
    /// message unchanged.
    async fn read_envelope<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> GatewayResult<Envelope<T>> {
        let response = self.signed(request)?.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Transport {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;

        if envelope.meta_data.code != SUCCESS_CODE {
            return Err(GatewayError::Domain {
                code: envelope.meta_data.code,
                message: envelope.meta_data.message,
            });
        }

        Ok(envelope)
    }

    fn payload<T>(envelope: Envelope<T>) -> GatewayResult<T> {
        envelope.response.ok_or_else(|| {
            GatewayError::Malformed("success envelope without a response payload".to_string())
        })
    }

    /// Look up participant eligibility by card number and service date.
    pub async fn check_eligibility(
        &self,
        card_number: &str,
        service_date: NaiveDate,
    ) -> GatewayResult<Peserta> {
        let path = format!(
            "Peserta/{}/tglSEP/{}",
            card_number,
            service_date.format("%Y-%m-%d")
        );
        debug!(card_number, %service_date, "checking participant eligibility");

        let envelope: Envelope<PesertaPayload> =
            self.read_envelope(self.client.get(self.url(&path))).await?;

        Ok(Self::payload(envelope)?.peserta)
    }

    /// Issue a SEP.
    ///
    /// This is the one state-changing operation: a SEP number is consumed at
    /// the insurer. Callers must not retry an ambiguous failure (for example
    /// a timeout) without first checking whether the SEP was created, or a
    /// duplicate may be issued.
    pub async fn create_sep(&self, request: &SepRequest) -> GatewayResult<Sep> {
        let body = serde_json::json!({ "request": request });

        let envelope: Envelope<SepPayload> = self
            .read_envelope(self.client.post(self.url("SEP/2.0/insert")).json(&body))
            .await?;

        let sep = Self::payload(envelope)?.sep;
        info!(no_sep = %sep.no_sep, user = %request.user, "SEP issued");
        Ok(sep)
    }

    /// Fetch a previously issued SEP by number.
    pub async fn get_sep(&self, sep_number: &str) -> GatewayResult<Sep> {
        let path = format!("SEP/2.0/{sep_number}");
        debug!(sep_number, "fetching SEP");

        let envelope: Envelope<Sep> =
            self.read_envelope(self.client.get(self.url(&path))).await?;

        Self::payload(envelope)
    }

    /// Void a previously issued SEP. The operator identity is recorded by
    /// the gateway for audit. Local storage is the caller's concern.
    pub async fn delete_sep(
        &self,
        sep_number: &str,
        operator_user: &str,
    ) -> GatewayResult<String> {
        let body = serde_json::json!({
            "request": {
                "noSep": sep_number,
                "user": operator_user,
            }
        });

        let envelope: Envelope<serde_json::Value> = self
            .read_envelope(self.client.delete(self.url("SEP/2.0/delete")).json(&body))
            .await?;

        info!(sep_number, user = operator_user, "SEP voided");
        Ok(envelope.meta_data.message)
    }

    /// Look up one of the gateway's static reference tables.
    pub async fn reference_list(&self, kind: ReferenceKind) -> GatewayResult<Vec<ReferenceItem>> {
        let path = kind.path();
        debug!(%path, "fetching reference list");

        let envelope: Envelope<ReferencePayload> =
            self.read_envelope(self.client.get(self.url(&path))).await?;

        Ok(Self::payload(envelope)?.into_items(&kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GatewayConfig {
        GatewayConfig::new(
            "https://apijkn.example.test/vclaim-rest/",
            "dev-cons",
            "dev-secret",
            "dev-user-key",
        )
    }

    #[test]
    fn client_normalizes_the_base_url() {
        let client = InsuranceGatewayClient::new(test_config()).unwrap();
        assert_eq!(
            client.url("SEP/2.0/insert"),
            "https://apijkn.example.test/vclaim-rest/SEP/2.0/insert"
        );
        assert_eq!(
            client.url("/Peserta/0001/tglSEP/2024-03-15"),
            "https://apijkn.example.test/vclaim-rest/Peserta/0001/tglSEP/2024-03-15"
        );
    }

    #[test]
    fn construction_rejects_empty_settings() {
        let config = GatewayConfig::new("", "dev-cons", "dev-secret", "dev-user-key");
        assert!(matches!(
            InsuranceGatewayClient::new(config),
            Err(GatewayError::Config(_))
        ));
    }
}
