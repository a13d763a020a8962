//! Sequential batch execution
//!
//! Items are processed strictly in order; each awaits its HTTP call before
//! the next begins. One output record is produced per element of an array
//! response, one per item otherwise.

use std::sync::Arc;
use std::time::Instant;

use dentaloffice_domain::{Parameters, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api_ports::DentalOfficeApi;
use crate::dispatch::Route;

/// One record emitted by a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemOutput {
    /// Index of the input item that produced this record.
    pub item_index: usize,
    pub json: Value,
    /// Failure message when the item failed and the batch continued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemOutput {
    fn success(item_index: usize, json: Value) -> Self {
        Self { item_index, json, error: None }
    }

    fn failure(item_index: usize, message: String) -> Self {
        Self { item_index, json: Value::Object(Map::new()), error: Some(message) }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Runs one resource/operation over a list of work items.
pub struct BatchExecutor {
    api: Arc<dyn DentalOfficeApi>,
    continue_on_fail: bool,
}

impl BatchExecutor {
    pub fn new(api: Arc<dyn DentalOfficeApi>) -> Self {
        Self { api, continue_on_fail: false }
    }

    /// Record failed items as `{json: {}, error}` instead of aborting.
    #[must_use]
    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    /// Execute `operation` on `resource` for every item.
    ///
    /// An unknown or unsupported resource/operation fails each item, so in
    /// failure-tolerant mode every item gets an error record.
    ///
    /// # Errors
    /// The first item error, unless failure-tolerant mode is enabled.
    pub async fn execute(
        &self,
        resource: &str,
        operation: &str,
        items: &[Parameters],
    ) -> Result<Vec<ItemOutput>> {
        let batch_id = Uuid::new_v4();
        let span = info_span!("batch", %batch_id, resource, operation, items = items.len());

        async {
            let route = Route::resolve(resource, operation);
            let mut outputs = Vec::with_capacity(items.len());

            for (item_index, params) in items.iter().enumerate() {
                let started = Instant::now();
                let outcome = match &route {
                    Ok(route) => self.execute_item(route, params).await,
                    Err(err) => Err(err.clone()),
                };
                let duration_ms = started.elapsed().as_millis() as u64;

                match outcome {
                    Ok(response) => {
                        let before = outputs.len();
                        push_response(&mut outputs, item_index, response);
                        info!(
                            item_index,
                            duration_ms,
                            records = outputs.len() - before,
                            "item completed"
                        );
                    }
                    Err(err) if self.continue_on_fail => {
                        warn!(
                            item_index,
                            duration_ms,
                            error.label = err.label(),
                            error = %err,
                            "item failed; continuing"
                        );
                        outputs.push(ItemOutput::failure(item_index, err.to_string()));
                    }
                    Err(err) => {
                        warn!(
                            item_index,
                            duration_ms,
                            error.label = err.label(),
                            error = %err,
                            "item failed"
                        );
                        return Err(err);
                    }
                }
            }

            debug!(records = outputs.len(), "batch finished");
            Ok(outputs)
        }
        .instrument(span)
        .await
    }

    async fn execute_item(&self, route: &Route, params: &Parameters) -> Result<Value> {
        let request = route.build(params)?;
        debug!(endpoint = %request.endpoint(), "dispatching request");
        self.api.send(&request).await
    }
}

fn push_response(outputs: &mut Vec<ItemOutput>, item_index: usize, response: Value) {
    match response {
        Value::Array(elements) => outputs
            .extend(elements.into_iter().map(|element| ItemOutput::success(item_index, element))),
        other => outputs.push(ItemOutput::success(item_index, other)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn arrays_fan_out_into_records() {
        let mut outputs = Vec::new();
        push_response(&mut outputs, 2, json!([{"id": 1}, {"id": 2}]));
        push_response(&mut outputs, 3, json!({"id": 3}));

        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[1], ItemOutput::success(2, json!({"id": 2})));
        assert_eq!(outputs[2].item_index, 3);
    }

    #[test]
    fn empty_array_yields_no_records() {
        let mut outputs = Vec::new();
        push_response(&mut outputs, 0, json!([]));
        assert!(outputs.is_empty());
    }

    #[test]
    fn failure_record_has_empty_json() {
        let output = ItemOutput::failure(1, "boom".into());

        assert!(output.is_error());
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"item_index": 1, "json": {}, "error": "boom"})
        );
    }
}
