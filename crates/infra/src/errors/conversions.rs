//! Conversions from external infrastructure errors into domain errors.

use dentaloffice_domain::DentalOfficeError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DentalOfficeError);

impl From<InfraError> for DentalOfficeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DentalOfficeError> for InfraError {
    fn from(value: DentalOfficeError) -> Self {
        InfraError(value)
    }
}

impl InfraError {
    /// A request that never produced a usable HTTP response.
    ///
    /// `endpoint` is the `"{METHOD} {path}"` context of the failed call.
    pub fn transport(err: HttpError, endpoint: impl Into<String>) -> Self {
        InfraError(DentalOfficeError::Api {
            status: err.status().map(|status| status.as_u16()),
            message: describe_transport(&err),
            endpoint: endpoint.into(),
        })
    }
}

fn describe_transport(err: &HttpError) -> String {
    if err.is_timeout() {
        return "HTTP request timed out".into();
    }

    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return format!("HTTP connection failure: {err}");
    }

    if err.is_decode() || err.is_body() {
        return format!("failed to read response body: {err}");
    }

    err.to_string()
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DentalOfficeError */
/* -------------------------------------------------------------------------- */

/// Errors raised while building a client or request, before anything is sent.
impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        if value.is_builder() {
            return InfraError(DentalOfficeError::Internal(format!(
                "failed to build HTTP request: {value}"
            )));
        }
        InfraError(DentalOfficeError::Internal(value.to_string()))
    }
}
