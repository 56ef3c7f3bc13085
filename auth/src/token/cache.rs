//! Access token cache with a single serialized refresh path.

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use tokio::sync::Mutex;
use tracing::debug;

use super::{AccessToken, TokenExchange};
use crate::credentials::Signer;

/// Default lifetime recorded for a freshly exchanged access token.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60;

/// Caches one access token minted from the signer's assertions.
///
/// The read-check-refresh sequence runs entirely under one lock, so concurrent
/// callers that find the slot empty or expired wait for a single refresh and
/// then observe its result instead of each exchanging their own assertion.
pub struct TokenCache {
    signer: Signer,
    access_duration: Duration,
    slot: Mutex<Option<AccessToken>>,
}

impl TokenCache {
    pub fn new(signer: Signer) -> Self {
        Self::with_access_duration(signer, Duration::seconds(ACCESS_TOKEN_TTL_SECS))
    }

    pub fn with_access_duration(signer: Signer, access_duration: Duration) -> Self {
        Self {
            signer,
            access_duration,
            slot: Mutex::new(None),
        }
    }

    pub fn client_id(&self) -> &str {
        self.signer.client_id()
    }

    /// Return a token that is valid at `now`, refreshing it first if needed.
    ///
    /// A failed signing or exchange leaves the slot untouched, so the next call
    /// starts over from scratch.
    pub async fn get_valid_token<X>(
        &self,
        exchange: &X,
        now: DateTime<Utc>,
    ) -> Result<SecretString, X::Error>
    where
        X: TokenExchange + ?Sized,
    {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if !cached.is_expired(now) {
                return Ok(cached.token.clone());
            }
            debug!("Access token expired at {}, refreshing", cached.expires_at);
        } else {
            debug!("No access token cached, fetching one");
        }

        let assertion = self.signer.sign(now)?;
        let token = exchange.exchange(assertion).await?;

        let expires_at = now + self.access_duration;
        *slot = Some(AccessToken {
            token: token.clone(),
            expires_at,
        });
        debug!("Access token refreshed, valid until {}", expires_at);

        Ok(token)
    }
}
