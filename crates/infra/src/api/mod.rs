//! Dental Office API access
//!
//! - `auth`: token issuance and the cached token provider
//! - `token_cache`: TTL cache keyed by credential identity
//! - `client`: authenticated request execution with one retry on `401`
//! - `errors`: error-body message extraction

pub mod auth;
pub mod client;
pub mod errors;
pub mod token_cache;

pub use auth::{AccessTokenProvider, CachedTokenProvider, TokenIssuer};
pub use client::DentalOfficeClient;
pub use errors::{extract_message, map_status_error};
pub use token_cache::TokenCache;
