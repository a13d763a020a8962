//! # Dental Office Domain
//!
//! Domain types shared by every crate in the workspace.
//!
//! This crate contains:
//! - The error taxonomy and `Result` alias
//! - Configuration and credential structures
//! - Resource/operation identifiers and the request descriptor
//! - The host parameter bag and its validation helpers
//! - Option catalogs exposed by the API (user groups, situations, ...)
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O

pub mod catalog;
pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
