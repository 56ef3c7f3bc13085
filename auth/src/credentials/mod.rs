//! Long-lived signing credential and the assertions minted from it.

mod signer;

use std::fmt;
use std::path::Path;

use jsonwebtoken::EncodingKey;

use crate::error::{credential_error, CredentialErrorKind, Error};

pub use signer::{AssertionClaims, Signer, ASSERTION_VALIDITY_SECS};

/// Client identifier plus the RSA private key registered for it.
///
/// Immutable for the lifetime of the process.
#[derive(Clone)]
pub struct Credential {
    client_id: String,
    key: EncodingKey,
}

impl Credential {
    /// Build a credential from PEM encoded RSA private key material.
    pub fn from_pem(client_id: &str, pem: &[u8]) -> Result<Self, Error> {
        if client_id.trim().is_empty() {
            return Err(credential_error(
                CredentialErrorKind::MissingClientId,
                "client id required",
            ));
        }

        let key = EncodingKey::from_rsa_pem(pem).map_err(|err| Error {
            source: Some(Box::new(err)),
            error_kind: crate::ErrorKind::Credential(CredentialErrorKind::InvalidKey),
        })?;

        Ok(Self {
            client_id: client_id.to_string(),
            key,
        })
    }

    /// Read a PEM file from disk and build a credential from it.
    pub fn from_pem_file(client_id: &str, path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let pem = std::fs::read(path).map_err(|err| Error {
            source: Some(format!("failed to read {}: {}", path.display(), err).into()),
            error_kind: crate::ErrorKind::Credential(CredentialErrorKind::Io),
        })?;
        Self::from_pem(client_id, &pem)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn key(&self) -> &EncodingKey {
        &self.key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &self.client_id)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
