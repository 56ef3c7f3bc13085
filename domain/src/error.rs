//! Error types for the `domain` layer.
use auth::error::Error as AuthError;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. Errors from `auth` are translated here so the binary only ever
/// deals with `domain::error::Error`.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    /// Credential loading or assertion signing failed.
    Auth,
    /// A single-entry list response came back empty.
    OutOfRange(String),
    /// A request payload could not be serialized.
    Encode,
    /// A workspace task panicked or was cancelled.
    Task,
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    /// The request never got a response; carries the operation name.
    Network(String),
    /// 4xx response, carrying the response body text.
    BadRequest(String),
    /// Any other non-success response.
    Status(u16),
    /// A successful response whose body did not decode; carries the operation name.
    Decode(String),
    /// The API reported an error inside a successful response.
    Api(String),
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            DomainErrorKind::External(ExternalErrorKind::BadRequest(body)) => {
                write!(f, "bad request: {body}")?
            }
            DomainErrorKind::External(ExternalErrorKind::Status(status)) => {
                write!(f, "unexpected response status {status}")?
            }
            DomainErrorKind::External(ExternalErrorKind::Network(operation)) => {
                write!(f, "while requesting {operation}")?
            }
            DomainErrorKind::External(ExternalErrorKind::Decode(operation)) => {
                write!(f, "while decoding {operation} response")?
            }
            DomainErrorKind::External(ExternalErrorKind::Api(message)) => write!(f, "{message}")?,
            DomainErrorKind::Internal(InternalErrorKind::OutOfRange(message)) => {
                write!(f, "{message}")?
            }
            kind => write!(f, "Domain Error: {kind:?}")?,
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
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

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            let target = err
                .url()
                .map(|url| url.path().to_string())
                .unwrap_or_else(|| "request".to_string());
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network(target)),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Encode),
        }
    }
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Auth),
        }
    }
}
