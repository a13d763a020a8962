//! Request descriptor
//!
//! One HTTP call to the vendor API, built per operation and discarded once
//! the call completes.

use std::fmt;

use serde_json::{Map, Value};

/// HTTP methods used by the Dental Office API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method, path, JSON body and query string of a single API call.
///
/// An empty body or query is represented as `None`/empty and is not sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Path relative to the credential base URL, e.g. `/v1/clinics/3/chairs`.
    pub path: String,
    pub body: Option<Map<String, Value>>,
    pub query: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, query: Vec::new() }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Attach a JSON body. Anything other than a non-empty object is dropped.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = match body {
            Value::Object(map) if !map.is_empty() => Some(map),
            _ => None,
        };
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// `"{METHOD} {path}"`, used as diagnostic context in errors and logs.
    pub fn endpoint(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Look up a query parameter by name.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_body_is_dropped() {
        let request = RequestDescriptor::put("/v1/users/1").with_body(json!({}));
        assert!(request.body.is_none());

        let request = RequestDescriptor::put("/v1/users/1").with_body(json!({"name": "Ana"}));
        assert_eq!(request.body.unwrap().get("name"), Some(&json!("Ana")));
    }

    #[test]
    fn endpoint_combines_method_and_path() {
        let request = RequestDescriptor::delete("/v1/clinics/2/chairs/9");
        assert_eq!(request.endpoint(), "DELETE /v1/clinics/2/chairs/9");
    }

    #[test]
    fn query_lookup() {
        let request = RequestDescriptor::get("/v1/dentists")
            .with_query(vec![("only_deleted".to_string(), "true".to_string())]);

        assert_eq!(request.query_value("only_deleted"), Some("true"));
        assert_eq!(request.query_value("page"), None);
    }
}
