//! Host parameter bag
//!
//! Each work item arrives as a loosely typed JSON object. The accessors here
//! apply the host's truthiness rules once, at the boundary, so the typed
//! commands built from them never re-check types:
//!
//! - `null`, `""`, `0` and `false` count as "not supplied" for optional values
//! - IDs may arrive as JSON numbers or numeric strings
//! - comma-separated ID lists and JSON text fields are parsed eagerly, and a
//!   malformed value fails with a validation error naming the parameter

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{DentalOfficeError, Result};

/// Named parameters supplied by the host for one work item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Map<String, Value>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, which must be an object (or `null` for no parameters).
    ///
    /// # Errors
    /// Returns a validation error for any other JSON type.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(DentalOfficeError::Validation {
                field: None,
                message: format!("work item parameters must be a JSON object, got {}", type_name(&other)),
            }),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text value; numbers are accepted and rendered as text.
    pub fn optional_string(&self, name: &str) -> Result<Option<String>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(expected(name, "text", other)),
        }
    }

    pub fn required_string(&self, name: &str) -> Result<String> {
        self.optional_string(name)?.ok_or_else(|| DentalOfficeError::missing_parameter(name))
    }

    /// Integer value where zero means "not supplied".
    pub fn optional_integer(&self, name: &str) -> Result<Option<i64>> {
        Ok(self.supplied_integer(name)?.filter(|value| *value != 0))
    }

    /// Identifier used as a path segment or mandatory field.
    pub fn required_id(&self, name: &str) -> Result<i64> {
        self.optional_integer(name)?.ok_or_else(|| DentalOfficeError::missing_parameter(name))
    }

    /// Integer value where zero is meaningful (e.g. `gender`).
    pub fn supplied_integer(&self, name: &str) -> Result<Option<i64>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| {
                DentalOfficeError::invalid_field(name, format!("`{name}` must be an integer, got \"{s}\""))
            }),
            Some(Value::Number(n)) => integer_from_number(name, n).map(Some),
            Some(other) => Err(expected(name, "an integer", other)),
        }
    }

    /// Boolean value; `"true"`/`"false"` strings are accepted.
    pub fn flag(&self, name: &str) -> Result<Option<bool>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => match s.trim() {
                "" => Ok(None),
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(DentalOfficeError::invalid_field(
                    name,
                    format!("`{name}` must be true or false, got \"{s}\""),
                )),
            },
            Some(other) => Err(expected(name, "a boolean", other)),
        }
    }

    /// `true` only when the flag is supplied and set.
    pub fn is_set(&self, name: &str) -> Result<bool> {
        Ok(self.flag(name)?.unwrap_or(false))
    }

    /// Comma-separated ID list such as `"1, 2,3"`; JSON arrays are accepted too.
    pub fn id_list(&self, name: &str) -> Result<Option<Vec<i64>>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => parse_id_list(name, s).map(Some),
            Some(Value::Number(n)) => integer_from_number(name, n).map(|id| Some(vec![id])),
            Some(Value::Array(items)) if items.is_empty() => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Number(n) => integer_from_number(name, n),
                    Value::String(s) => parse_list_segment(name, s),
                    other => Err(expected(name, "a list of integers", other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(other) => Err(expected(name, "a comma-separated list of integers", other)),
        }
    }

    /// Free-form JSON supplied as text; objects and arrays pass through.
    pub fn json_field(&self, name: &str) -> Result<Option<Value>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => parse_json_field(name, s).map(Some),
            Some(value @ (Value::Object(_) | Value::Array(_))) => Ok(Some(value.clone())),
            Some(other) => Err(expected(name, "JSON text", other)),
        }
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Split `raw` on commas, trim each segment and parse it as an integer.
///
/// ```
/// use dentaloffice_domain::parse_id_list;
///
/// assert_eq!(parse_id_list("clinicIds", "1, 2,3").unwrap(), vec![1, 2, 3]);
/// assert!(parse_id_list("clinicIds", "1,x").is_err());
/// ```
///
/// # Errors
/// Returns a validation error naming `field` if any segment is not an integer.
pub fn parse_id_list(field: &str, raw: &str) -> Result<Vec<i64>> {
    raw.split(',').map(|segment| parse_list_segment(field, segment)).collect()
}

/// Parse JSON text supplied for `field`.
///
/// # Errors
/// Returns a validation error naming `field` when `raw` is not valid JSON.
pub fn parse_json_field(field: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|err| {
        DentalOfficeError::invalid_field(field, format!("invalid JSON for `{field}`: {err}"))
    })
}

fn parse_list_segment(field: &str, segment: &str) -> Result<i64> {
    let trimmed = segment.trim();
    trimmed.parse::<i64>().map_err(|_| {
        DentalOfficeError::invalid_field(
            field,
            format!("`{field}` must be a comma-separated list of integers, got \"{trimmed}\""),
        )
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integer_from_number(name: &str, number: &serde_json::Number) -> Result<i64> {
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => Ok(value as i64),
        _ => Err(DentalOfficeError::invalid_field(
            name,
            format!("`{name}` must be an integer, got {number}"),
        )),
    }
}

fn expected(name: &str, what: &str, got: &Value) -> DentalOfficeError {
    DentalOfficeError::invalid_field(name, format!("`{name}` must be {what}, got {}", type_name(got)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
