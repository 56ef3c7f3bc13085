//! Access token types, the exchange seam and the token cache.

mod cache;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::error::Error;

pub use cache::{TokenCache, ACCESS_TOKEN_TTL_SECS};

/// A bearer access token and the instant it stops being usable.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: SecretString,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// A token is expired once `now` reaches its recorded expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Exchanges a signed assertion for an access token at the API's token endpoint.
///
/// The API client implements this so the cache never needs to know how requests
/// are built or dispatched.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    type Error: From<Error> + Send;

    async fn exchange(&self, assertion: SecretString) -> Result<SecretString, Self::Error>;
}
