//! # Dental Office Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-based HTTP transport
//! - Token issuance, the token cache and the authenticated API client
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements `DentalOfficeApi` defined in `dentaloffice-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{AccessTokenProvider, DentalOfficeClient, TokenCache};
pub use errors::InfraError;
pub use http::HttpClient;
