//! Authenticated Dental Office API client
//!
//! Every call carries a bearer token from an [`AccessTokenProvider`]. When
//! the API answers `401` the cached token is discarded, a new one is issued
//! and the request is retried exactly once; if that attempt fails too the
//! error is reported as an authentication failure. No other retries happen.

use std::sync::Arc;

use async_trait::async_trait;
use dentaloffice_common::time::Clock;
use dentaloffice_core::DentalOfficeApi;
use dentaloffice_domain::{
    Config, Credentials, DentalOfficeError, HttpMethod, RequestDescriptor, Result,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use super::auth::{as_authentication_error, AccessTokenProvider, CachedTokenProvider, TokenIssuer};
use super::errors::map_status_error;
use super::token_cache::TokenCache;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// API client bound to one set of credentials.
pub struct DentalOfficeClient {
    http: HttpClient,
    credentials: Credentials,
    auth: Arc<dyn AccessTokenProvider>,
}

impl DentalOfficeClient {
    /// Client with its own token cache, using the configured TTL.
    ///
    /// # Errors
    /// Returns `DentalOfficeError::Config` for incomplete credentials and
    /// `DentalOfficeError::Internal` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let cache = Arc::new(TokenCache::new(config.auth.token_ttl()));
        Self::with_token_cache(config, cache)
    }

    /// Client sharing `cache` with other clients.
    pub fn with_token_cache<C: Clock + 'static>(
        config: &Config,
        cache: Arc<TokenCache<C>>,
    ) -> Result<Self> {
        config.credentials.validate()?;

        let http = HttpClient::from_config(&config.http)?;
        let issuer = TokenIssuer::new(http.clone(), config.credentials.clone());
        let auth = Arc::new(CachedTokenProvider::new(issuer, cache));

        Ok(Self::with_token_provider(http, config.credentials.clone(), auth))
    }

    /// Client with a caller-supplied token provider.
    pub fn with_token_provider(
        http: HttpClient,
        credentials: Credentials,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self { http, credentials, auth }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Obtain a token without calling any resource endpoint.
    ///
    /// Useful as a credential check.
    pub async fn authenticate(&self) -> Result<()> {
        self.auth.access_token().await.map(|_| ())
    }

    /// Execute `request` with authentication and the single `401` retry.
    ///
    /// Returns the parsed JSON body; an empty body yields `{}`.
    ///
    /// # Errors
    /// - `Authentication` if no token can be obtained, or the request still
    ///   fails after re-authenticating
    /// - `Api` for any other non-2xx response or transport failure
    #[instrument(skip(self, request), fields(endpoint = %request.endpoint()))]
    pub async fn authorized_request(&self, request: &RequestDescriptor) -> Result<Value> {
        let endpoint = request.endpoint();

        let token = self.auth.access_token().await?;
        let response = self.execute(request, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("request rejected with 401; re-authenticating");
            self.auth.invalidate();
            return self
                .retry_with_new_token(request, &endpoint)
                .await
                .map_err(as_authentication_error);
        }

        let value = read_response(response, &endpoint).await?;
        info!("request succeeded");
        Ok(value)
    }

    async fn retry_with_new_token(
        &self,
        request: &RequestDescriptor,
        endpoint: &str,
    ) -> Result<Value> {
        let token = self.auth.access_token().await?;
        let response = self.execute(request, &token).await?;
        let value = read_response(response, endpoint).await?;
        info!("request succeeded after re-authentication");
        Ok(value)
    }

    async fn execute(&self, request: &RequestDescriptor, token: &str) -> Result<Response> {
        let url = self.credentials.url_for(&request.path);
        let mut builder = self
            .http
            .request(to_reqwest_method(request.method), &url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        self.http.send(builder, &request.endpoint()).await
    }
}

#[async_trait]
impl DentalOfficeApi for DentalOfficeClient {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value> {
        self.authorized_request(request).await
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

async fn read_response(response: Response, endpoint: &str) -> Result<Value> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|err| DentalOfficeError::from(InfraError::transport(err, endpoint)))?;

    if !status.is_success() {
        let err = map_status_error(status, &text, endpoint);
        debug!(%status, error = %err, "request failed");
        return Err(err);
    }

    if text.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    // Plain-text success bodies are passed through as a JSON string.
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_method() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Post), Method::POST);
        assert_eq!(to_reqwest_method(HttpMethod::Put), Method::PUT);
        assert_eq!(to_reqwest_method(HttpMethod::Delete), Method::DELETE);
    }

    struct StaticToken;

    #[async_trait]
    impl AccessTokenProvider for StaticToken {
        async fn access_token(&self) -> Result<String> {
            Ok("tok-1".into())
        }

        fn invalidate(&self) {}
    }

    #[tokio::test]
    async fn transport_error_reports_api_path_under_prefixed_base_url() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let credentials = Credentials::new(format!("http://{addr}/api/"), "client-1", "s3cret");
        let client = DentalOfficeClient::with_token_provider(
            HttpClient::new().unwrap(),
            credentials,
            Arc::new(StaticToken),
        );

        let err = client.authorized_request(&RequestDescriptor::get("/v1/users")).await.unwrap_err();
        match err {
            DentalOfficeError::Api { status, endpoint, .. } => {
                assert_eq!(status, None);
                assert_eq!(endpoint, "GET /v1/users");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_incomplete_credentials() {
        let config = Config::new(Credentials::new("https://acme.example.com", "client-1", ""));

        let err = DentalOfficeClient::new(&config).err().expect("should fail");
        assert_eq!(err.label(), "config");
    }
}
