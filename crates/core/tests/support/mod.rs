//! Shared test helpers for `dentaloffice-core` integration tests.

pub mod api;
