//! Per-call request metadata.

use http::Method;
use serde_json::{Map, Value};

/// One API call: method, path, query parameters and an optional JSON body.
///
/// Built fresh for each call and consumed by [`crate::Executor::execute`].
///
/// # Examples
///
/// ```
/// use rocketreach::Request;
/// use serde_json::json;
///
/// let request = Request::get("/person/lookup")
///     .with_query_value("name", &json!("Jane Doe"))
///     .with_query_value("id", &json!(42));
///
/// assert_eq!(request.query, vec![
///     ("name".to_string(), "Jane Doe".to_string()),
///     ("id".to_string(), "42".to_string()),
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,

    /// The request path, relative to the base URL.
    pub path: String,

    /// Query parameters in send order. Keys may repeat.
    pub query: Vec<(String, String)>,

    /// JSON body, if any.
    pub body: Option<Value>,
}

impl Request {
    /// Creates a request with no query and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Adds a query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a query parameter from a JSON value.
    ///
    /// Strings are sent verbatim, other scalars as their JSON text, arrays as
    /// a repeated key, and `null` is skipped. Objects are sent as JSON text.
    pub fn with_query_value(mut self, key: impl Into<String>, value: &Value) -> Self {
        let key = key.into();
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    self = self.with_query_value(key.clone(), item);
                }
            }
            Value::String(s) => self = self.with_query_param(key, s.as_str()),
            other => self = self.with_query_param(key, other.to_string()),
        }
        self
    }

    /// Adds every entry of a JSON object as query parameters.
    pub fn with_query(self, params: &Map<String, Value>) -> Self {
        params
            .iter()
            .fold(self, |request, (key, value)| request.with_query_value(key, value))
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Joins a base URL and a path with exactly one `/` at the seam.
///
/// # Examples
///
/// ```
/// use rocketreach::request::join_url;
///
/// assert_eq!(join_url("https://host/api", "/x"), "https://host/api/x");
/// assert_eq!(join_url("https://host/api/", "x"), "https://host/api/x");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
