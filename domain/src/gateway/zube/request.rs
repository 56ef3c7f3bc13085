//! Builds well-formed Zube API requests without any authentication attached.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use log::*;
use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Request, Url};

const X_CLIENT_ID: &str = "x-client-id";

/// Turns (method, relative path, body) into a request against the API base URL.
///
/// Authentication is layered on at dispatch time, so the token endpoint can be
/// called with the signed assertion instead of a cached access token.
#[derive(Debug, Clone)]
pub struct ApiRequestBuilder {
    base_url: Url,
    client_id: HeaderValue,
}

impl ApiRequestBuilder {
    pub fn new(base_url: &str, client_id: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url).map_err(|err| {
            warn!("Invalid API base URL {base_url}: {err:?}");
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            }
        })?;

        let client_id = HeaderValue::from_str(client_id).map_err(|err| {
            warn!("Failed to create client id header value: {err:?}");
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            }
        })?;

        Ok(Self {
            base_url,
            client_id,
        })
    }

    pub fn build(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Request, Error> {
        let url = self.base_url.join(path).map_err(|err| {
            warn!("Failed to join {path} onto {}: {err:?}", self.base_url);
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(format!(
                    "Invalid request path {path}"
                ))),
            }
        })?;

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(X_CLIENT_ID), self.client_id.clone());

        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    fn builder() -> ApiRequestBuilder {
        ApiRequestBuilder::new("https://zube.io/api/", "client-123").unwrap()
    }

    #[test]
    fn test_build_sets_json_and_client_headers() {
        let request = builder().build(Method::GET, "projects", None).unwrap();

        assert_eq!(*request.method(), Method::GET);
        assert_eq!(request.url().as_str(), "https://zube.io/api/projects");
        assert_eq!(request.headers()[ACCEPT], "application/json");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(request.headers()["x-client-id"], "client-123");
        assert!(request.body().is_none());
    }

    #[test]
    fn test_build_never_attaches_authorization() {
        let request = builder()
            .build(Method::POST, "users/tokens", None)
            .unwrap();
        assert!(!request.headers().contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_build_keeps_query_and_body() {
        let request = builder()
            .build(
                Method::PUT,
                "workspaces/4/user_email_preferences/9?page=2",
                Some(br#"{"id":9}"#.to_vec()),
            )
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://zube.io/api/workspaces/4/user_email_preferences/9?page=2"
        );
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(&br#"{"id":9}"#[..])
        );
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let err = ApiRequestBuilder::new("not a url", "client-123").unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config)
        );
    }
}
