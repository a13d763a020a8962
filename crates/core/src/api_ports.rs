//! Port for the authenticated Dental Office API

use async_trait::async_trait;
use dentaloffice_domain::{RequestDescriptor, Result};
use serde_json::Value;

/// Executes one request against the vendor API with a valid bearer token.
///
/// Implementations own token acquisition and the single re-authentication
/// retry on `401`. An empty success body is returned as `{}`.
#[async_trait]
pub trait DentalOfficeApi: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value>;
}
