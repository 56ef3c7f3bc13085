//! Shared fixtures for tests that talk to a mockito server.

use super::ApiClient;
use auth::credentials::Credential;
use clap::Parser;
use mockito::{Mock, ServerGuard};
use service::config::Config;

pub(crate) const CLIENT_ID: &str = "client-123";
pub(crate) const ACCESS_TOKEN: &str = "access-abc";
pub(crate) const AUTHORIZED: &str = "Bearer access-abc";

const PRIVATE_KEY: &str = include_str!("../../../../testdata/rsa_private_key.pem");

pub(crate) fn config(server_url: &str) -> Config {
    Config::parse_from(["zube_notify_rs", "-c", CLIENT_ID, "--api-base-url", server_url])
}

pub(crate) fn credential() -> Credential {
    Credential::from_pem(CLIENT_ID, PRIVATE_KEY.as_bytes()).unwrap()
}

pub(crate) fn api_client(server_url: &str) -> ApiClient {
    ApiClient::new(&config(server_url), credential()).unwrap()
}

/// Token endpoint that must be hit exactly once per client.
pub(crate) async fn mock_token_exchange(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/users/tokens")
        .match_header("x-client-id", CLIENT_ID)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"access_token":"{ACCESS_TOKEN}"}}"#))
        .expect(1)
        .create_async()
        .await
}
