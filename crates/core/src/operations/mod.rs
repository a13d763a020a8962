//! Typed per-operation commands
//!
//! Every `(resource, operation)` pair has a handler that validates the host
//! parameter bag into a typed command and renders it as a
//! [`RequestDescriptor`]. Validation happens entirely here, so a malformed
//! item fails before any HTTP traffic.
//!
//! Body structs rely on `skip_serializing_if` to leave out fields the host
//! did not supply; path identifiers are `#[serde(skip)]` and never reach the
//! body.

pub mod chairs;
pub mod customers;
pub mod dentists;
pub mod schedules;
pub mod users;

use dentaloffice_domain::{DentalOfficeError, Parameters, RequestDescriptor, Result};
use serde::Serialize;
use serde_json::Value;

/// Builds the request for one work item.
pub type Handler = fn(&Parameters) -> Result<RequestDescriptor>;

/// Validating constructor shared by all commands.
pub trait FromParameters: Sized {
    /// # Errors
    /// Returns `DentalOfficeError::Validation` naming the offending parameter.
    fn from_parameters(params: &Parameters) -> Result<Self>;
}

/// A single record addressed by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
}

impl FromParameters for Record {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self { id: params.required_id("id")? })
    }
}

/// A record nested under a clinic: `/v1/clinics/{clinic_id}/.../{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClinicRecord {
    pub clinic_id: i64,
    pub id: i64,
}

impl FromParameters for ClinicRecord {
    fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self { clinic_id: params.required_id("clinicId")?, id: params.required_id("id")? })
    }
}

pub(crate) fn clinic_path(clinic_id: i64, collection: &str) -> String {
    format!("/v1/clinics/{clinic_id}/{collection}")
}

pub(crate) fn encode_body<T: Serialize>(command: &T) -> Result<Value> {
    serde_json::to_value(command).map_err(|err| {
        DentalOfficeError::Internal(format!("failed to encode request body: {err}"))
    })
}

/// Flatten a command into query pairs. Strings are sent verbatim, everything
/// else in its JSON text form (`true`, `42`).
pub(crate) fn encode_query<T: Serialize>(command: &T) -> Result<Vec<(String, String)>> {
    let Value::Object(fields) = encode_body(command)? else {
        return Ok(Vec::new());
    };

    Ok(fields
        .into_iter()
        .map(|(name, value)| {
            let rendered = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (name, rendered)
        })
        .collect())
}
