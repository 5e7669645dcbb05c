use chrono::Utc;
use tokio::sync::RwLock;

/// An access token with its measured expiry.
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub access_token: String,
    /// Epoch seconds at which the issuer expires the token.
    pub expires_at: i64,
}

/// Single-slot cache for the platform's OAuth access token.
///
/// Owned by the client instance (never a module-level singleton) so a test
/// can seed it with a pre-valid or pre-expired token. The lock guards only
/// the slot itself and is never held across a refresh request: two
/// concurrent callers that both find the slot stale will both fetch a fresh
/// token, and the last write wins. Both tokens are valid at the issuer.
pub struct TokenCache {
    slot: RwLock<Option<CachedToken>>,
    skew_seconds: i64,
}

impl TokenCache {
    pub fn new(skew_seconds: i64) -> Self {
        Self {
            slot: RwLock::new(None),
            skew_seconds,
        }
    }

    /// A cache pre-loaded with a token, for deterministic tests.
    pub fn seeded(access_token: impl Into<String>, expires_at: i64, skew_seconds: i64) -> Self {
        Self {
            slot: RwLock::new(Some(CachedToken {
                access_token: access_token.into(),
                expires_at,
            })),
            skew_seconds,
        }
    }

    /// The cached token, unless absent or within the skew window of expiry.
    pub async fn current(&self) -> Option<String> {
        let now = Utc::now().timestamp();
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|token| token.expires_at - self.skew_seconds > now)
            .map(|token| token.access_token.clone())
    }

    /// Record a freshly issued token with its `expires_in` lifetime.
    pub async fn store(&self, access_token: String, expires_in: i64) {
        let expires_at = Utc::now().timestamp() + expires_in;
        *self.slot.write().await = Some(CachedToken {
            access_token,
            expires_at,
        });
    }

    /// Drop the cached token, forcing the next call to refresh.
    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }
}
