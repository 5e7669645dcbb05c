use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{GatewayError, GatewayResult};

type HmacSha256 = Hmac<Sha256>;

/// Current Unix timestamp in seconds, generated once per request.
pub fn unix_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Gateway request signature: base64(HMAC-SHA256(secret, "{consumerId}&{timestamp}")).
///
/// The signature is bound to the timestamp, so it must be recomputed for
/// every request together with a fresh `unix_timestamp`.
pub fn signature(consumer_id: &str, secret: &str, timestamp: i64) -> GatewayResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| GatewayError::Config(format!("invalid signing secret: {e}")))?;
    mac.update(format!("{consumer_id}&{timestamp}").as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
