//! The retrying request executor.
//!
//! [`Executor`] owns one pooled `reqwest::Client` with the authentication
//! headers baked in, and runs every call through a single retry loop:
//!
//! - transport failures retry with exponential backoff,
//! - 429 responses retry after the server's `Retry-After`,
//! - any other non-2xx status fails immediately as [`Error::Api`].

use crate::{
    config::ExecutorConfig,
    rate_limit::retry_after_secs,
    request::join_url,
    retry::{exponential_delay, Sleeper, TokioSleeper},
    Error, Request, Response, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// The `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("rocketreach-rust/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "api-key";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Executes API calls with authentication, retries and error classification.
///
/// Cloning is cheap and clones share the connection pool. The pool is
/// released when the last clone is dropped.
///
/// # Examples
///
/// ```no_run
/// use rocketreach::{Executor, ExecutorConfig};
/// use serde_json::json;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), rocketreach::Error> {
/// let executor = Executor::new(
///     ExecutorConfig::builder("my-api-key")
///         .max_retries(2)
///         .base_retry_delay(Duration::from_millis(500))
///         .build(),
/// )?;
///
/// let account = executor.get("/account", None).await?;
/// println!("Account: {}", account);
///
/// let results = executor
///     .post("/person/search", Some(json!({"query": {"name": ["Jane Doe"]}})))
///     .await?;
/// println!("Results: {}", results);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Executor {
    inner: Arc<ExecutorInner>,
}

struct ExecutorInner {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    max_retries: usize,
    base_retry_delay: Duration,
    max_rate_limit_wait: Option<Duration>,
    sleeper: Arc<dyn Sleeper>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = &self.inner.api_key;
        let prefix: String = key.chars().take(8).collect();
        f.debug_struct("Executor")
            .field("base_url", &self.inner.base_url)
            .field("api_key", &format!("{}...", prefix))
            .field("timeout", &self.inner.timeout)
            .field("max_retries", &self.inner.max_retries)
            .field("base_retry_delay", &self.inner.base_retry_delay)
            .field("max_rate_limit_wait", &self.inner.max_rate_limit_wait)
            .finish()
    }
}

impl Executor {
    /// Creates an executor that sleeps on the tokio timer between retries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the API key is empty or whitespace, and
    /// [`Error::InvalidUrl`] if the base URL does not parse.
    pub fn new(config: ExecutorConfig) -> Result<Self> {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Creates an executor that waits between retries through `sleeper`.
    ///
    /// # Errors
    ///
    /// Same as [`Executor::new`].
    pub fn with_sleeper(config: ExecutorConfig, sleeper: Arc<dyn Sleeper>) -> Result<Self> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(Error::Config("API key cannot be empty".to_string()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let mut default_headers = HeaderMap::new();
        let key_value = HeaderValue::try_from(api_key)
            .map_err(|e| Error::Config(format!("Invalid API key header value: {}", e)))?;
        default_headers.insert(HeaderName::from_static(API_KEY_HEADER), key_value);
        default_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        default_headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        let http_client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Executor {
            inner: Arc::new(ExecutorInner {
                http_client,
                base_url,
                api_key: api_key.to_string(),
                timeout: config.timeout,
                max_retries: config.max_retries,
                base_retry_delay: config.base_retry_delay,
                max_rate_limit_wait: config.max_rate_limit_wait,
                sleeper,
            }),
        })
    }

    /// The trimmed API key.
    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    /// The base URL without trailing separators.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Retries permitted after the first attempt.
    pub fn max_retries(&self) -> usize {
        self.inner.max_retries
    }

    /// The exponential backoff base.
    pub fn base_retry_delay(&self) -> Duration {
        self.inner.base_retry_delay
    }

    /// The cap on a single rate-limit wait, if any.
    pub fn max_rate_limit_wait(&self) -> Option<Duration> {
        self.inner.max_rate_limit_wait
    }

    /// Runs one call through the retry loop and returns the full response.
    ///
    /// Makes at most `max_retries + 1` attempts.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let url = Url::parse(&join_url(&self.inner.base_url, &request.path))?;
        let max_retries = self.inner.max_retries;
        let start_time = Instant::now();
        let mut last_error = None;

        for attempt in 0..=max_retries {
            let (status, headers, raw_body) =
                match self.send_once(&request, url.clone(), attempt).await {
                    Ok(parts) => parts,
                    Err(e) => {
                        let error = Error::from_transport(e);
                        tracing::warn!(
                            error = %error,
                            attempt = attempt,
                            method = %request.method,
                            path = %request.path,
                            "Request failed"
                        );

                        if attempt < max_retries {
                            let delay = exponential_delay(self.inner.base_retry_delay, attempt);
                            tracing::info!(
                                delay_ms = delay.as_millis(),
                                attempt = attempt,
                                "Retrying request after delay"
                            );
                            self.inner.sleeper.sleep(delay).await;
                        }
                        last_error = Some(error);
                        continue;
                    }
                };

            let latency = start_time.elapsed();
            tracing::info!(
                status = status.as_u16(),
                latency_ms = latency.as_millis(),
                attempt = attempt,
                "Received HTTP response"
            );

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = retry_after_secs(&headers);
                if attempt < max_retries {
                    tracing::info!(
                        retry_after_secs = retry_after,
                        attempt = attempt,
                        "Rate limited - waiting before retry"
                    );
                    let mut wait = Duration::from_secs(retry_after);
                    if let Some(max_wait) = self.inner.max_rate_limit_wait {
                        wait = wait.min(max_wait);
                    }
                    self.inner.sleeper.sleep(wait).await;
                    continue;
                }

                return Err(Error::RateLimit {
                    status,
                    retry_after,
                    message: "Rate limit exceeded".to_string(),
                    raw_response: raw_body,
                });
            }

            if !status.is_success() {
                return Err(classify_error_response(status, raw_body));
            }

            return parse_success(status, headers, raw_body, latency, attempt + 1);
        }

        Err(last_error.unwrap_or_else(|| Error::Network {
            message: "Request failed after all retry attempts".to_string(),
            source: None,
        }))
    }

    /// Makes a GET request, sending `query` as URL parameters.
    pub async fn get(&self, path: &str, query: Option<&Map<String, Value>>) -> Result<Value> {
        let mut request = Request::get(path);
        if let Some(query) = query {
            request = request.with_query(query);
        }
        Ok(self.execute(request).await?.data)
    }

    /// Makes a POST request with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        self.send_with_body(Request::post(path), body).await
    }

    /// Makes a PUT request with an optional JSON body.
    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<Value> {
        self.send_with_body(Request::new(Method::PUT, path), body).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        Ok(self.execute(Request::new(Method::DELETE, path)).await?.data)
    }

    async fn send_with_body(&self, mut request: Request, body: Option<Value>) -> Result<Value> {
        if let Some(body) = body {
            request = request.with_body(body);
        }
        Ok(self.execute(request).await?.data)
    }

    /// Sends one attempt and reads the whole body.
    async fn send_once(
        &self,
        request: &Request,
        url: Url,
        attempt: usize,
    ) -> std::result::Result<(StatusCode, HeaderMap, String), reqwest::Error> {
        tracing::debug!(
            method = %request.method,
            url = %url,
            attempt = attempt,
            "Executing HTTP request"
        );

        let mut builder = self
            .inner
            .http_client
            .request(request.method.clone(), url)
            .timeout(self.inner.timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.text().await?;

        Ok((status, headers, raw_body))
    }
}

/// Turns a non-2xx, non-429 response into [`Error::Api`].
fn classify_error_response(status: StatusCode, raw_response: String) -> Error {
    let (message, details) = match serde_json::from_str::<Value>(&raw_response) {
        Ok(Value::Object(body)) => {
            let message = match body.get("message") {
                Some(Value::String(s)) => s.clone(),
                None | Some(Value::Null) => UNKNOWN_ERROR.to_string(),
                Some(other) => other.to_string(),
            };
            let details = match body.get("details") {
                Some(Value::Object(details)) => details.clone(),
                _ => Map::new(),
            };
            (message, details)
        }
        _ if raw_response.is_empty() => (UNKNOWN_ERROR.to_string(), Map::new()),
        _ => (raw_response.clone(), Map::new()),
    };

    if status.is_client_error() {
        tracing::error!(
            status = status.as_u16(),
            response = %raw_response,
            "Client error (4xx)"
        );
    } else if status.is_server_error() {
        tracing::warn!(
            status = status.as_u16(),
            response = %raw_response,
            "Server error (5xx)"
        );
    }

    Error::Api {
        status,
        raw_response,
        message,
        details,
    }
}

fn parse_success(
    status: StatusCode,
    headers: HeaderMap,
    raw_body: String,
    latency: Duration,
    attempts: usize,
) -> Result<Response> {
    match serde_json::from_str::<Value>(&raw_body) {
        Ok(data) => Ok(Response {
            data,
            raw_body,
            status,
            headers,
            latency,
            attempts,
        }),
        Err(e) => {
            tracing::error!(
                error = %e,
                raw_response = %raw_body,
                "Failed to parse response"
            );

            Err(Error::MalformedResponse {
                raw_response: raw_body,
                serde_error: e.to_string(),
                status,
            })
        }
    }
}
