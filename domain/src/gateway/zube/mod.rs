//! Zube API client.
//!
//! Authenticated calls take an access token from the shared [`TokenCache`]; the
//! cache in turn exchanges signed assertions through this client's
//! `POST users/tokens` call. Endpoint methods live in the sibling modules.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use async_trait::async_trait;
use auth::credentials::{Credential, Signer};
use auth::token::{TokenCache, TokenExchange};
use chrono::Utc;
use log::*;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Request, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use service::config::Config;
use std::time::Duration;

mod pagination;
mod preferences;
mod projects;
mod request;
mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use pagination::{Page, Pagination};
pub use request::ApiRequestBuilder;

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

/// Zube API client.
///
/// Constructed once per run and shared (behind an `Arc`) by every workspace task.
pub struct ApiClient {
    client: reqwest::Client,
    requests: ApiRequestBuilder,
    tokens: TokenCache,
}

impl ApiClient {
    /// Create a new client for the configured API base URL and credential.
    pub fn new(config: &Config, credential: Credential) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let requests = ApiRequestBuilder::new(&config.api_base_url(), credential.client_id())?;
        let tokens = TokenCache::with_access_duration(
            Signer::new(credential),
            chrono::Duration::seconds(config.access_token_ttl_secs),
        );

        Ok(Self {
            client,
            requests,
            tokens,
        })
    }

    pub fn client_id(&self) -> &str {
        self.tokens.client_id()
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request, Error> {
        self.requests.build(method, path, body)
    }

    /// Send a request, attaching a cached access token unless the request
    /// already carries its own Authorization header. Transport failures, including
    /// those while fetching the token, name `operation`.
    pub(crate) async fn dispatch(
        &self,
        mut request: Request,
        operation: &str,
    ) -> Result<Response, Error> {
        if !request.headers().contains_key(AUTHORIZATION) {
            let token = self
                .tokens
                .get_valid_token(self, Utc::now())
                .await
                .map_err(|err| match err.error_kind {
                    DomainErrorKind::External(ExternalErrorKind::Network(_)) => Error {
                        source: Some(Box::new(err)),
                        error_kind: DomainErrorKind::External(ExternalErrorKind::Network(
                            operation.to_string(),
                        )),
                    },
                    _ => err,
                })?;
            request
                .headers_mut()
                .insert(AUTHORIZATION, bearer_header(&token)?);
        }
        self.send(request, operation).await
    }

    /// Send a request as-is. Any 4xx or 5xx response becomes an error carrying
    /// the response body.
    async fn send(&self, request: Request, operation: &str) -> Result<Response, Error> {
        debug!("doing {} {}", request.method(), request.url());
        let url = request.url().clone();

        let response = self.client.execute(request).await.map_err(|e| {
            warn!("Request to {url} for {operation} failed: {e:?}");
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network(
                    operation.to_string(),
                )),
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        warn!("Zube API error for {url}: {status} - {error_text}");
        let error_kind = if status.is_client_error() {
            ExternalErrorKind::BadRequest(error_text)
        } else {
            ExternalErrorKind::Status(status.as_u16())
        };
        Err(Error {
            source: None,
            error_kind: DomainErrorKind::External(error_kind),
        })
    }

    /// Decode a successful response body, naming `operation` if it doesn't parse.
    pub(crate) async fn decode<T: DeserializeOwned>(
        response: Response,
        operation: &str,
    ) -> Result<T, Error> {
        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read {operation} response: {e:?}");
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network(
                    operation.to_string(),
                )),
            }
        })?;
        debug!("{operation} response: {}", String::from_utf8_lossy(&body));

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse {operation} response: {e:?}");
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Decode(
                    operation.to_string(),
                )),
            }
        })
    }

    /// Authenticated GET of `path`, decoded as `T`.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        operation: &str,
    ) -> Result<T, Error> {
        let request = self.request(Method::GET, path, None)?;
        let response = self.dispatch(request, operation).await?;
        Self::decode(response, operation).await
    }
}

#[async_trait]
impl TokenExchange for ApiClient {
    type Error = Error;

    async fn exchange(&self, assertion: SecretString) -> Result<SecretString, Error> {
        let mut request = self.request(Method::POST, "users/tokens", None)?;
        request
            .headers_mut()
            .insert(AUTHORIZATION, bearer_header(&assertion)?);

        let response = self.send(request, "access token").await?;
        let body: AccessTokenResponse = Self::decode(response, "access token").await?;

        if body.access_token.is_empty() {
            warn!("Token endpoint returned an empty access token");
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                    "Empty access token in response".to_string(),
                )),
            });
        }

        info!("Obtained access token for client {}", self.client_id());
        Ok(SecretString::new(body.access_token))
    }
}

fn bearer_header(token: &SecretString) -> Result<HeaderValue, Error> {
    let auth_value = format!("Bearer {}", token.expose_secret());
    let mut header_value = HeaderValue::from_str(&auth_value).map_err(|err| {
        warn!("Failed to create authorization header value: {err:?}");
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to create authorization header value".to_string(),
            )),
        }
    })?;
    header_value.set_sensitive(true);
    Ok(header_value)
}
