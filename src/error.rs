//! Error types for RocketReach API calls.
//!
//! Every failure the executor can produce is one variant of [`Error`]. Callers
//! are expected to branch on the variant: back off on [`Error::RateLimit`],
//! stop a flow on a 401 [`Error::Api`], and so on. Raw response bodies are
//! preserved wherever the server sent one.

use http::StatusCode;
use serde_json::{Map, Value};

/// The error type for every operation in this crate.
///
/// # Examples
///
/// ```no_run
/// use rocketreach::{Error, Executor, ExecutorConfig};
///
/// # async fn example() -> Result<(), Error> {
/// let executor = Executor::new(ExecutorConfig::builder("my-api-key").build())?;
///
/// match executor.get("/account", None).await {
///     Ok(account) => println!("Account: {}", account),
///     Err(Error::RateLimit { retry_after, .. }) => {
///         eprintln!("Slow down, retry in {}s", retry_after);
///     }
///     Err(Error::Api { status, message, .. }) if status.as_u16() == 401 => {
///         eprintln!("Bad API key: {}", message);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid construction input, such as an empty API key.
    ///
    /// Never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server answered with a non-2xx status other than 429.
    ///
    /// `message` and `details` are extracted from the JSON error body when
    /// there is one. Never retried.
    #[error("API error {status}: {message}")]
    Api {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The `message` field of the error body, or a fallback
        message: String,
        /// The `details` field of the error body, empty when absent
        details: Map<String, Value>,
    },

    /// The server answered 429 on the final permitted attempt.
    #[error("{message} | Retry after: {retry_after} seconds | Status: {status}")]
    RateLimit {
        /// Always `429 Too Many Requests`
        status: StatusCode,
        /// Seconds the server asked us to wait
        retry_after: u64,
        /// Human readable message
        message: String,
        /// The raw response body
        raw_response: String,
    },

    /// A transport-level failure on the final permitted attempt.
    ///
    /// Covers timeouts, refused connections, and failures reading the body.
    #[error("Network error: {message}")]
    Network {
        /// Short description of the failure
        message: String,
        /// The underlying transport error, when there is one
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A 2xx response whose body is not valid JSON.
    #[error("Failed to parse response (status {status}): {serde_error}")]
    MalformedResponse {
        /// The raw response body that failed to parse
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// A query or body value could not be serialized to JSON.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// The base URL, or the base URL joined with a path, does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Builds a [`Error::Network`] from a transport error, naming the failure
    /// kind the way the message reads in logs.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timeout".to_string()
        } else if err.is_connect() {
            "Connection error".to_string()
        } else {
            format!("Request failed: {}", err)
        };
        Error::Network {
            message,
            source: Some(err),
        }
    }

    /// Returns `true` for the kinds the executor retries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rocketreach::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::RateLimit {
    ///     status: StatusCode::TOO_MANY_REQUESTS,
    ///     retry_after: 60,
    ///     message: "Rate limit exceeded".to_string(),
    ///     raw_response: String::new(),
    /// };
    /// assert!(err.is_retryable());
    ///
    /// let err = Error::Api {
    ///     status: StatusCode::INTERNAL_SERVER_ERROR,
    ///     raw_response: String::new(),
    ///     message: "boom".to_string(),
    ///     details: Default::default(),
    /// };
    /// assert!(!err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network { .. } | Error::RateLimit { .. })
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::RateLimit { status, .. } => Some(*status),
            Error::MalformedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the server answered with a 4xx status.
    ///
    /// Rate-limit errors count as client errors.
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_client_error())
    }

    /// Returns `true` if the server answered with a 5xx status.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Api { raw_response, .. } => Some(raw_response),
            Error::RateLimit { raw_response, .. } => Some(raw_response),
            Error::MalformedResponse { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the server-directed delay in seconds for rate-limit errors.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::RateLimit { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Returns the `details` mapping of an API error.
    pub fn details(&self) -> Option<&Map<String, Value>> {
        match self {
            Error::Api { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Returns the message carried by API, rate-limit and network errors.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. }
            | Error::RateLimit { message, .. }
            | Error::Network { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// A specialized `Result` type for RocketReach API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_error(status: StatusCode) -> Error {
        Error::Api {
            status,
            raw_response: String::new(),
            message: "Unknown error".to_string(),
            details: Map::new(),
        }
    }

    #[test]
    fn test_client_and_server_classification() {
        let err = api_error(StatusCode::NOT_FOUND);
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = api_error(StatusCode::BAD_GATEWAY);
        assert!(!err.is_client_error());
        assert!(err.is_server_error());

        let err = Error::Network {
            message: "Connection error".to_string(),
            source: None,
        };
        assert!(!err.is_client_error());
        assert!(!err.is_server_error());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_rate_limit_display_and_accessors() {
        let err = Error::RateLimit {
            status: StatusCode::TOO_MANY_REQUESTS,
            retry_after: 30,
            message: "Rate limit exceeded".to_string(),
            raw_response: "slow down".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Rate limit exceeded | Retry after: 30 seconds | Status: 429 Too Many Requests"
        );
        assert_eq!(err.retry_after(), Some(30));
        assert_eq!(err.raw_response(), Some("slow down"));
        assert!(err.is_client_error());
        assert!(err.details().is_none());
    }

    #[test]
    fn test_api_error_details() {
        let mut details = Map::new();
        details.insert("field".to_string(), json!("name"));
        let err = Error::Api {
            status: StatusCode::BAD_REQUEST,
            raw_response: String::new(),
            message: "Invalid parameters".to_string(),
            details,
        };

        assert_eq!(err.message(), Some("Invalid parameters"));
        assert_eq!(err.details().and_then(|d| d.get("field")), Some(&json!("name")));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_config_error_is_not_retryable() {
        let err = Error::Config("API key cannot be empty".to_string());
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Configuration error: API key cannot be empty");
    }
}
