//! Scripted `DentalOfficeApi` implementation for executor tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use dentaloffice_core::DentalOfficeApi;
use dentaloffice_domain::{RequestDescriptor, Result};
use parking_lot::Mutex;
use serde_json::Value;

/// Replays queued responses in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next `send`.
    pub fn respond(self, outcome: Result<Value>) -> Self {
        self.responses.lock().push_back(outcome);
        self
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl DentalOfficeApi for ScriptedApi {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value> {
        self.requests.lock().push(request.clone());
        self.responses.lock().pop_front().unwrap_or_else(|| Ok(Value::Object(Default::default())))
    }
}
