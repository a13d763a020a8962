//! Small shared utilities for the Dental Office adapter crates.
//!
//! Currently this is the clock abstraction used for token expiry, so that
//! cache behaviour can be tested without real time passing.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod time;

pub use time::{Clock, MockClock, SystemClock};
