//! Successful-response wrapper.
//!
//! [`Response`] carries the parsed JSON body along with the status, headers,
//! raw text, latency, and how many attempts the executor needed.

use crate::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// A successful (2xx) API response.
///
/// # Examples
///
/// ```no_run
/// use rocketreach::{Executor, ExecutorConfig, Request};
///
/// # async fn example() -> Result<(), rocketreach::Error> {
/// let executor = Executor::new(ExecutorConfig::new("my-api-key"))?;
/// let response = executor.execute(Request::get("/account")).await?;
///
/// println!("Status: {}", response.status);
/// println!("Took {:?} over {} attempt(s)", response.latency, response.attempts);
/// println!("Body: {}", response.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The parsed JSON body.
    pub data: Value,

    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from the first attempt until this response, including every
    /// retry sleep.
    pub latency: Duration,

    /// Attempts made, `1` when the first try succeeded.
    pub attempts: usize,
}

impl Response {
    /// Returns `true` if the request required retries.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Deserializes the body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.data.clone()).map_err(|e| Error::MalformedResponse {
            raw_response: self.raw_body.clone(),
            serde_error: e.to_string(),
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use serde::Deserialize;
    use serde_json::json;

    fn response(data: Value, attempts: usize) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        Response {
            raw_body: data.to_string(),
            data,
            status: StatusCode::OK,
            headers,
            latency: Duration::from_millis(5),
            attempts,
        }
    }

    #[test]
    fn test_was_retried() {
        assert!(!response(json!({}), 1).was_retried());
        assert!(response(json!({}), 3).was_retried());
    }

    #[test]
    fn test_header_lookup() {
        let response = response(json!({}), 1);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_typed_json() {
        #[derive(Deserialize)]
        struct Health {
            status: String,
        }

        let response = response(json!({"status": "ok"}), 1);
        let health: Health = response.json().unwrap();
        assert_eq!(health.status, "ok");

        let err = response.json::<Vec<u32>>().unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }
}
