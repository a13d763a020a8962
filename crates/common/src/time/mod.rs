//! Time abstractions
//!
//! Token expiry is measured against a [`Clock`] rather than `Instant::now()`
//! directly. Production code uses [`SystemClock`]; tests use [`MockClock`]
//! and advance it manually.
//!
//! ```
//! use std::time::Duration;
//!
//! use dentaloffice_common::time::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(clock.now().duration_since(start), Duration::from_secs(5));
//! ```

mod clock;

pub use clock::{Clock, MockClock, SystemClock};
