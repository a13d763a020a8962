//! Domain constants
//!
//! Centralized location for values fixed by the Dental Office API contract.

// Authentication
pub const TOKEN_ENDPOINT: &str = "/v1/auth/tokens";
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 23 * 60 * 60;
pub const MAX_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

// Transport
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("dentaloffice-adapter/", env!("CARGO_PKG_VERSION"));

// Scheduling
pub const DEFAULT_AVAILABLE_HOURS_DAYS: i64 = 7;

// Customer listing: `active` filter value that means "no filter"
pub const ACTIVE_FILTER_BOTH: &str = "both";
