//! Retry policy for the show metadata API
//!
//! Decides which failures are worth another attempt and how long to wait,
//! honouring `Retry-After` when the server sends one.

use crate::shared::errors::AppError;
use reqwest::StatusCode;
use std::time::Duration;

/// Configuration for HTTP retry behavior
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries (will be adjusted based on headers)
    pub base_delay: Duration,
    /// Maximum delay to wait (prevents excessive waits)
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add up to 10% random jitter to computed delays
    pub jitter: bool,
}

impl RetryPolicy {
    /// Policy for interactive search: few retries, short waits. A user who
    /// keeps typing supersedes the request long before a long backoff ends.
    pub fn interactive() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// No retries at all
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    /// Calculate delay for next retry attempt
    pub fn calculate_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        // If server provided Retry-After header, respect it
        if let Some(server_delay) = retry_after {
            return server_delay.min(self.max_delay);
        }

        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let mut delay = Duration::from_millis((self.base_delay.as_millis() as f64 * multiplier) as u64)
            .min(self.max_delay);

        if self.jitter && !delay.is_zero() {
            let jitter_ms = (delay.as_millis() as f64 * 0.1 * rand::random::<f64>()) as u64;
            delay += Duration::from_millis(jitter_ms);
        }

        delay
    }
}

/// Information extracted from HTTP 429 responses
#[derive(Debug, Clone, Default)]
pub struct RateLimitInfo {
    /// How long to wait before next request (from Retry-After header)
    pub retry_after: Option<Duration>,
    /// Number of requests remaining (from X-RateLimit-Remaining header)
    pub remaining: Option<u32>,
    /// Total rate limit (from X-RateLimit-Limit header)
    pub limit: Option<u32>,
}

impl RateLimitInfo {
    /// Parse rate limit information from HTTP response headers
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let header_u64 = |name: &str| {
            headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
        };

        Self {
            retry_after: header_u64("retry-after").map(Duration::from_secs),
            remaining: header_u64("x-ratelimit-remaining").map(|v| v as u32),
            limit: header_u64("x-ratelimit-limit").map(|v| v as u32),
        }
    }
}

/// Check if HTTP status code indicates a retryable error
pub fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::REQUEST_TIMEOUT
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Determines if a transport error is retryable
pub fn is_retryable_error(error: &AppError) -> bool {
    matches!(
        error,
        AppError::Timeout(_)
            | AppError::ConnectionError(_)
            | AppError::RateLimitError(_)
            | AppError::ServerError { .. }
    )
}

/// Convert a non-success HTTP status to the matching [`AppError`]
pub fn status_to_app_error(status: StatusCode, provider_name: &str) -> AppError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            AppError::RateLimitError(format!("{} rate limit exceeded", provider_name))
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            AppError::Timeout(format!("{} returned {}", provider_name, status))
        }
        StatusCode::NOT_FOUND => AppError::NotFound(format!("{} resource not found", provider_name)),
        _ if status.is_server_error() => AppError::ServerError {
            status: status.as_u16(),
            message: format!("{} service error", provider_name),
        },
        _ => AppError::ApiError(format!(
            "Unexpected status code from {}: {}",
            provider_name, status
        )),
    }
}
