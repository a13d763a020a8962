//! Client-credentials authentication
//!
//! The Dental Office API issues an opaque bearer token in exchange for the
//! customer's client ID and secret. Tokens carry no expiry metadata, so they
//! are cached for a fixed TTL (23h by default) and re-issued on demand.

use std::sync::Arc;

use async_trait::async_trait;
use dentaloffice_common::time::{Clock, SystemClock};
use dentaloffice_domain::constants::TOKEN_ENDPOINT;
use dentaloffice_domain::{Credentials, DentalOfficeError, Result};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::errors::map_status_error;
use super::token_cache::TokenCache;
use crate::http::HttpClient;

const INVALID_CREDENTIALS: &str = "invalid credentials: check the client ID and secret";
const MISSING_TOKEN: &str = "access token not returned by the API";

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token, issuing a new one if none is cached.
    ///
    /// # Errors
    /// Returns `DentalOfficeError::Authentication` if issuance fails.
    async fn access_token(&self) -> Result<String>;

    /// Forget the current token so the next call re-authenticates.
    fn invalidate(&self);
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Performs `POST /v1/auth/tokens`.
#[derive(Clone)]
pub struct TokenIssuer {
    http: HttpClient,
    credentials: Credentials,
}

impl TokenIssuer {
    pub fn new(http: HttpClient, credentials: Credentials) -> Self {
        Self { http, credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Exchange the credentials for a fresh token. Never consults a cache.
    ///
    /// # Errors
    /// Every failure, including transport errors, is reported as
    /// `DentalOfficeError::Authentication`.
    pub async fn issue(&self) -> Result<String> {
        let url = self.credentials.url_for(TOKEN_ENDPOINT);
        let endpoint = format!("POST {TOKEN_ENDPOINT}");
        let body = TokenRequest {
            client_id: &self.credentials.client_id,
            secret: &self.credentials.secret,
        };

        debug!(client_id = %self.credentials.client_id, "requesting access token");

        let response = self
            .http
            .send(self.http.request(Method::POST, &url).json(&body), &endpoint)
            .await
            .map_err(as_authentication_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(DentalOfficeError::Authentication(INVALID_CREDENTIALS.into()));
        }

        let text = response.text().await.map_err(|err| {
            DentalOfficeError::Authentication(format!("failed to read token response: {err}"))
        })?;

        if !status.is_success() {
            return Err(as_authentication_error(map_status_error(status, &text, &endpoint)));
        }

        let token = serde_json::from_str::<TokenResponse>(&text)
            .ok()
            .and_then(|parsed| parsed.token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| DentalOfficeError::Authentication(MISSING_TOKEN.into()))?;

        info!(client_id = %self.credentials.client_id, "access token issued");
        Ok(token)
    }
}

/// Token provider backed by a shared [`TokenCache`].
pub struct CachedTokenProvider<C: Clock = SystemClock> {
    issuer: TokenIssuer,
    cache: Arc<TokenCache<C>>,
    key: String,
}

impl<C: Clock> CachedTokenProvider<C> {
    pub fn new(issuer: TokenIssuer, cache: Arc<TokenCache<C>>) -> Self {
        let key = issuer.credentials().cache_key();
        Self { issuer, cache, key }
    }

    pub fn cache(&self) -> &Arc<TokenCache<C>> {
        &self.cache
    }
}

#[async_trait]
impl<C: Clock + 'static> AccessTokenProvider for CachedTokenProvider<C> {
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.cache.get(&self.key) {
            debug!("using cached access token");
            return Ok(token);
        }

        let token = self.issuer.issue().await?;
        self.cache.store(&self.key, token.clone());
        Ok(token)
    }

    fn invalidate(&self) {
        if self.cache.evict(&self.key) {
            debug!("cached access token evicted");
        }
    }
}

/// Reduce any error to an `Authentication` error, keeping its message.
pub(crate) fn as_authentication_error(err: DentalOfficeError) -> DentalOfficeError {
    match err {
        DentalOfficeError::Authentication(_) => err,
        other => DentalOfficeError::Authentication(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dentaloffice_common::time::MockClock;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn issuer_for(server: &MockServer) -> TokenIssuer {
        let credentials = Credentials::new(format!("{}/", server.uri()), "client-1", "s3cret");
        TokenIssuer::new(HttpClient::new().expect("http client"), credentials)
    }

    #[tokio::test]
    async fn posts_client_credentials_and_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/tokens"))
            .and(body_json(json!({"client_id": "client-1", "secret": "s3cret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let token = issuer_for(&server).issue().await.expect("token");
        assert_eq!(token, "tok-1");
    }

    #[tokio::test]
    async fn unauthorized_means_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/tokens"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = issuer_for(&server).issue().await.unwrap_err();
        assert_eq!(err, DentalOfficeError::Authentication(INVALID_CREDENTIALS.into()));
    }

    #[tokio::test]
    async fn missing_token_field_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/tokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expires_in": 3600})))
            .mount(&server)
            .await;

        let err = issuer_for(&server).issue().await.unwrap_err();
        assert_eq!(err, DentalOfficeError::Authentication(MISSING_TOKEN.into()));
    }

    #[tokio::test]
    async fn server_error_surfaces_as_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/tokens"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "maintenance"})),
            )
            .mount(&server)
            .await;

        let err = issuer_for(&server).issue().await.unwrap_err();
        match err {
            DentalOfficeError::Authentication(message) => assert!(message.contains("maintenance")),
            other => panic!("expected authentication error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn provider_reuses_cached_token_until_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/tokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1"})))
            .expect(2)
            .mount(&server)
            .await;

        let clock = MockClock::new();
        let cache = Arc::new(TokenCache::with_clock(Duration::from_secs(60), clock.clone()));
        let provider = CachedTokenProvider::new(issuer_for(&server), cache.clone());

        provider.access_token().await.expect("first");
        provider.access_token().await.expect("cached");
        clock.advance(Duration::from_secs(61));
        provider.access_token().await.expect("reissued");

        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn cache_key_uses_raw_base_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1"})))
            .mount(&server)
            .await;

        let cache = Arc::new(TokenCache::with_clock(Duration::from_secs(60), MockClock::new()));
        let provider = CachedTokenProvider::new(issuer_for(&server), cache.clone());
        provider.access_token().await.expect("token");

        let key = format!("{}/:client-1", server.uri());
        assert_eq!(cache.get(&key).as_deref(), Some("tok-1"));

        provider.invalidate();
        assert!(cache.is_empty());
    }
}
