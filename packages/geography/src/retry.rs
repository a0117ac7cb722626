//! HTTP retry helper for the boundary download.
//!
//! The boundary file is fetched exactly once per run, so a single
//! connection-level retry loop is enough: transient failures (timeouts,
//! connection resets, HTTP 429 and 5xx) are retried with exponential
//! backoff, everything else fails immediately.

use std::time::Duration;

use crate::GeoError;

/// Maximum number of retry attempts after the first request.
///
/// With exponential backoff (2s, 4s, 8s) the total wait before giving up
/// is 14 seconds.
pub const MAX_RETRIES: u32 = 3;

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Sends an HTTP request and returns the response body as a `String`.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`] (builders are consumed by `.send()`).
///
/// # Errors
///
/// Returns [`GeoError`] if the request fails after all retries or the
/// server returns a non-retryable status code.
#[allow(clippy::future_not_send)]
pub async fn send_text<F>(build_request: F) -> Result<String, GeoError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    send_text_with_retries(build_request, MAX_RETRIES).await
}

/// [`send_text`] with an explicit retry budget.
///
/// # Errors
///
/// See [`send_text`].
#[allow(clippy::future_not_send)]
pub async fn send_text_with_retries<F>(
    build_request: F,
    max_retries: u32,
) -> Result<String, GeoError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error: Option<GeoError> = None;

    for attempt in 0..=max_retries {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt);
            log::warn!("  retry {attempt}/{max_retries} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        let response = match build_request().send().await {
            Ok(response) => response,
            Err(e) => {
                if is_transient(&e) && attempt < max_retries {
                    log::warn!("  transient error: {e}");
                    last_error = Some(GeoError::Http(e));
                    continue;
                }
                return Err(GeoError::Http(e));
            }
        };

        let status = response.status();
        let url = response.url().to_string();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            if attempt < max_retries {
                log::warn!("  HTTP {status} from {url} (will retry)");
                last_error = Some(GeoError::Conversion {
                    message: format!("HTTP {status}"),
                });
                continue;
            }
            return Err(GeoError::Conversion {
                message: format!("HTTP {status} after {max_retries} retries"),
            });
        }

        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            log::error!("HTTP {status} from {url}: {}", preview(&body));
            return Err(GeoError::Conversion {
                message: format!("HTTP {status}"),
            });
        }

        match response.text().await {
            Ok(text) => return Ok(text),
            Err(e) => {
                if attempt < max_retries {
                    log::warn!("  response body read failed: {e}");
                    last_error = Some(GeoError::Http(e));
                    continue;
                }
                return Err(GeoError::Http(e));
            }
        }
    }

    Err(last_error.unwrap_or_else(|| GeoError::Conversion {
        message: "request failed after all retries".to_string(),
    }))
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_request()
}

/// Truncates a response body for logging.
fn preview(body: &str) -> String {
    if body.len() <= BODY_PREVIEW_LEN {
        return body.to_string();
    }
    let mut end = BODY_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_keeps_short_bodies() {
        assert_eq!(preview("not found"), "not found");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "ñ".repeat(BODY_PREVIEW_LEN);
        let out = preview(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= BODY_PREVIEW_LEN + 3);
    }
}
