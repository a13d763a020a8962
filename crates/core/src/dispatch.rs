//! Resource × operation routing
//!
//! The routing table is a `match` over [`Resource`] and [`Operation`]; any
//! pair not listed here is unsupported.

use dentaloffice_domain::{
    DentalOfficeError, Operation, Parameters, RequestDescriptor, Resource, Result,
};

use crate::operations::{chairs, customers, dentists, schedules, users, Handler};

/// Handler for a `(resource, operation)` pair, if the pair is supported.
pub fn handler(resource: Resource, operation: Operation) -> Option<Handler> {
    let handler: Handler = match (resource, operation) {
        (Resource::User, Operation::Create) => users::create,
        (Resource::User, Operation::List) => users::list,
        (Resource::User, Operation::Get) => users::get,
        (Resource::User, Operation::Update) => users::update,
        (Resource::User, Operation::Delete) => users::delete,

        (Resource::Dentist, Operation::Create) => dentists::create,
        (Resource::Dentist, Operation::List) => dentists::list,
        (Resource::Dentist, Operation::Get) => dentists::get,
        (Resource::Dentist, Operation::Update) => dentists::update,
        (Resource::Dentist, Operation::Delete) => dentists::delete,

        (Resource::Customer, Operation::Create) => customers::create,
        (Resource::Customer, Operation::List) => customers::list,
        (Resource::Customer, Operation::Get) => customers::get,
        (Resource::Customer, Operation::Update) => customers::update,
        (Resource::Customer, Operation::Delete) => customers::delete,

        (Resource::Schedule, Operation::Create) => schedules::create,
        (Resource::Schedule, Operation::List) => schedules::list,
        (Resource::Schedule, Operation::Get) => schedules::get,
        (Resource::Schedule, Operation::Update) => schedules::update,
        (Resource::Schedule, Operation::Delete) => schedules::delete,
        (Resource::Schedule, Operation::GetAvailableHours) => schedules::available_hours,

        (Resource::Chair, Operation::Create) => chairs::create,
        (Resource::Chair, Operation::List) => chairs::list,
        (Resource::Chair, Operation::Get) => chairs::get,
        (Resource::Chair, Operation::Update) => chairs::update,
        (Resource::Chair, Operation::Delete) => chairs::delete,

        _ => return None,
    };
    Some(handler)
}

/// Every supported pair, in resource then operation order.
pub fn supported_operations() -> Vec<(Resource, Operation)> {
    Resource::ALL
        .iter()
        .flat_map(|resource| Operation::ALL.iter().map(move |operation| (*resource, *operation)))
        .filter(|(resource, operation)| handler(*resource, *operation).is_some())
        .collect()
}

/// A resolved route: typed identifiers plus the handler that builds requests.
#[derive(Clone, Copy)]
pub struct Route {
    pub resource: Resource,
    pub operation: Operation,
    handler: Handler,
}

impl Route {
    /// Resolve host-supplied names such as `"schedule"` / `"getAvailableHours"`.
    ///
    /// # Errors
    /// Unknown names and unsupported pairs both yield
    /// `DentalOfficeError::UnsupportedOperation` carrying the names as given.
    pub fn resolve(resource: &str, operation: &str) -> Result<Self> {
        let unsupported = || DentalOfficeError::unsupported(operation, resource);

        let resource_id = Resource::from_name(resource).ok_or_else(unsupported)?;
        let operation_id = Operation::from_name(operation).ok_or_else(unsupported)?;
        let handler = handler(resource_id, operation_id).ok_or_else(unsupported)?;

        Ok(Self { resource: resource_id, operation: operation_id, handler })
    }

    /// Validate one item's parameters and build its request.
    pub fn build(&self, params: &Parameters) -> Result<RequestDescriptor> {
        (self.handler)(params)
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("resource", &self.resource)
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}

/// Resolve and build in one step.
///
/// # Errors
/// See [`Route::resolve`] and the per-operation validation rules.
pub fn build_request(
    resource: &str,
    operation: &str,
    params: &Parameters,
) -> Result<RequestDescriptor> {
    Route::resolve(resource, operation)?.build(params)
}
