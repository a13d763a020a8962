//! Shared fixtures for infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use dentaloffice_common::time::MockClock;
use dentaloffice_domain::{Config, Credentials};
use dentaloffice_infra::{DentalOfficeClient, TokenCache};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "client-1";
pub const SECRET: &str = "s3cret";
pub const TOKEN_TTL: Duration = Duration::from_secs(23 * 60 * 60);

/// Adapter configuration pointing at the mock server.
pub fn config_for(server: &MockServer) -> Config {
    Config::new(Credentials::new(server.uri(), CLIENT_ID, SECRET))
}

/// Client with a `MockClock`-driven token cache, plus handles to both.
pub fn client_with_clock(
    server: &MockServer,
) -> (DentalOfficeClient, Arc<TokenCache<MockClock>>, MockClock) {
    let clock = MockClock::new();
    let cache = Arc::new(TokenCache::with_clock(TOKEN_TTL, clock.clone()));
    let client = DentalOfficeClient::with_token_cache(&config_for(server), cache.clone())
        .expect("client should build");
    (client, cache, clock)
}

/// Token endpoint handing out `token`, expected to be hit exactly `times`.
pub async fn mount_token(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/auth/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .expect(times)
        .named("token issuance")
        .mount(server)
        .await;
}

/// Number of requests the server saw for `path`.
pub async fn hits(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}
