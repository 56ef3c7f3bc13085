//! RS256 signed assertions used as the refresh credential.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, Header};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Credential;
use crate::error::{signing_error, Error, SigningErrorKind};

/// How long a freshly minted assertion stays valid.
pub const ASSERTION_VALIDITY_SECS: i64 = 60;

/// Standard claims carried by the assertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

impl AssertionClaims {
    fn validate(&self) -> Result<(), Error> {
        if self.iss.is_empty() {
            return Err(signing_error(
                SigningErrorKind::InvalidClaims,
                "issuer must not be empty",
            ));
        }
        if self.exp <= self.iat {
            return Err(signing_error(
                SigningErrorKind::InvalidClaims,
                &format!("exp ({}) must be after iat ({})", self.exp, self.iat),
            ));
        }
        Ok(())
    }
}

/// Turns the long-lived credential into short-lived signed assertions.
#[derive(Debug, Clone)]
pub struct Signer {
    credential: Credential,
    validity: Duration,
}

impl Signer {
    pub fn new(credential: Credential) -> Self {
        Self::with_validity(credential, Duration::seconds(ASSERTION_VALIDITY_SECS))
    }

    pub fn with_validity(credential: Credential, validity: Duration) -> Self {
        Self {
            credential,
            validity,
        }
    }

    pub fn client_id(&self) -> &str {
        self.credential.client_id()
    }

    /// Claims for an assertion issued at `now`.
    pub fn claims(&self, now: DateTime<Utc>) -> AssertionClaims {
        AssertionClaims {
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
            iss: self.credential.client_id().to_string(),
        }
    }

    /// Mint a signed assertion issued at `now`.
    pub fn sign(&self, now: DateTime<Utc>) -> Result<SecretString, Error> {
        let claims = self.claims(now);
        claims.validate()?;

        let token = encode(
            &Header::new(Algorithm::RS256),
            &claims,
            self.credential.key(),
        )?;
        debug!("Minted assertion for {} expiring at {}", claims.iss, claims.exp);

        Ok(SecretString::new(token))
    }
}
