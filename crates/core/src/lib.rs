//! # Dental Office Core
//!
//! Request construction and batch orchestration - no HTTP code.
//!
//! This crate contains:
//! - Typed per-operation commands built from host parameters
//! - The resource × operation routing table
//! - The `DentalOfficeApi` port implemented by the infra crate
//! - The sequential batch executor
//!
//! ## Architecture Principles
//! - Only depends on `dentaloffice-domain`
//! - All network access goes through the `DentalOfficeApi` trait

pub mod api_ports;
pub mod dispatch;
pub mod executor;
pub mod operations;

pub use api_ports::DentalOfficeApi;
pub use dispatch::{build_request, supported_operations, Route};
pub use executor::{BatchExecutor, ItemOutput};
pub use operations::{FromParameters, Handler};
