//! Domain types
//!
//! Identifiers for what to call ([`Resource`], [`Operation`]), the host's
//! per-item input ([`Parameters`]) and the HTTP call it turns into
//! ([`RequestDescriptor`]).

pub mod operation;
pub mod parameters;
pub mod request;

pub use operation::{Operation, Resource};
pub use parameters::{parse_id_list, parse_json_field, Parameters};
pub use request::{HttpMethod, RequestDescriptor};
