//! Error types for the `auth` crate.
//!
//! Follows the same pattern as domain::error with a root Error struct and error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for the auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Credential(CredentialErrorKind),
    Signing(SigningErrorKind),
    Token(TokenErrorKind),
}

/// Errors from loading the long-lived signing credential.
#[derive(Debug, PartialEq)]
pub enum CredentialErrorKind {
    MissingClientId,
    Io,
    InvalidKey,
}

/// Errors from minting a signed assertion.
#[derive(Debug, PartialEq)]
pub enum SigningErrorKind {
    InvalidClaims,
    SignatureFailed,
}

/// Errors from exchanging an assertion for an access token.
#[derive(Debug, PartialEq)]
pub enum TokenErrorKind {
    Exchange,
    Malformed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Credential(kind) => write!(f, "Credential error: {:?}", kind)?,
            ErrorKind::Signing(kind) => write!(f, "Signing error: {:?}", kind)?,
            ErrorKind::Token(kind) => write!(f, "Token error: {:?}", kind)?,
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Signing(SigningErrorKind::SignatureFailed),
        }
    }
}

/// Helper function to create credential errors.
pub fn credential_error(kind: CredentialErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Credential(kind),
    }
}

/// Helper function to create signing errors.
pub fn signing_error(kind: SigningErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Signing(kind),
    }
}

/// Helper function to create token errors.
pub fn token_error(kind: TokenErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Token(kind),
    }
}
