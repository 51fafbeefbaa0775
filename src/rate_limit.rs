//! `Retry-After` parsing for 429 responses.

use http::HeaderMap;
use std::time::SystemTime;

/// Seconds to wait when a 429 response carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Reads the server-directed wait from a 429 response's headers.
///
/// Accepts delay-seconds or an HTTP date. Falls back to
/// [`DEFAULT_RETRY_AFTER_SECS`] when the header is absent or unparseable.
///
/// # Examples
///
/// ```
/// use rocketreach::rate_limit::retry_after_secs;
/// use http::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// assert_eq!(retry_after_secs(&headers), 60);
///
/// headers.insert("retry-after", "15".parse().unwrap());
/// assert_eq!(retry_after_secs(&headers), 15);
/// ```
pub fn retry_after_secs(headers: &HeaderMap) -> u64 {
    parse_retry_after(headers).unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    let header = headers.get(http::header::RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(seconds) = header.parse::<u64>() {
        return Some(seconds);
    }

    // A date in the past means "now".
    let date_time = httpdate::parse_http_date(header).ok()?;
    let wait = date_time
        .duration_since(SystemTime::now())
        .map(|d| d.as_secs())
        .unwrap_or(0);
    Some(wait)
}
