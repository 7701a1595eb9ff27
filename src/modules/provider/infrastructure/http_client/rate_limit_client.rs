//! HTTP client with automatic rate limiting and retry logic
//!
//! Every request waits on a governor quota before it is sent, then goes
//! through the [`RetryPolicy`] for retryable statuses and transport errors.

use super::retry_policy::{
    is_retryable_error, is_retryable_status, status_to_app_error, RateLimitInfo, RetryPolicy,
};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use reqwest::{Client, Response};
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tokio::time::sleep;

use crate::shared::utils::LogContext;

/// HTTP client that handles rate limiting and retries
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DefaultDirectRateLimiter,
    retry_policy: RetryPolicy,
    provider_name: String,
}

impl RateLimitClient {
    /// Client configured for the TVmaze API (20 calls per 10 seconds)
    pub fn for_tvmaze(config: &AppConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                AppError::InitializationError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self::new(
            "TVmaze",
            client,
            RetryPolicy::interactive(),
            Self::create_rate_limiter(config.requests_per_second, 5)?,
        ))
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    fn create_rate_limiter(
        requests_per_second: f64,
        burst_size: u32,
    ) -> AppResult<DefaultDirectRateLimiter> {
        if requests_per_second.is_nan() || requests_per_second <= 0.0 {
            return Err(AppError::InitializationError(format!(
                "Invalid request rate: {}",
                requests_per_second
            )));
        }

        let period = Duration::from_secs_f64(1.0 / requests_per_second);
        let burst = NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period)
            .ok_or_else(|| {
                AppError::InitializationError("Rate limit period must be non-zero".to_string())
            })?
            .allow_burst(burst);

        Ok(GovernorRateLimiter::direct(quota))
    }

    /// Create a custom client
    pub fn new(
        provider_name: &str,
        client: Client,
        retry_policy: RetryPolicy,
        rate_limiter: DefaultDirectRateLimiter,
    ) -> Self {
        Self {
            client,
            rate_limiter,
            retry_policy,
            provider_name: provider_name.to_string(),
        }
    }

    /// GET a JSON document with rate limiting and retries
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let started = Instant::now();
        LogContext::api_call(&self.provider_name, url, "started", None);

        let response = self.request_with_retries(url, query).await?;
        let parsed = self.parse_response(response).await;

        LogContext::api_call(
            &self.provider_name,
            url,
            if parsed.is_ok() { "ok" } else { "parse-failed" },
            Some(started.elapsed().as_millis() as u64),
        );
        parsed
    }

    async fn request_with_retries(&self, url: &str, query: &[(&str, &str)]) -> AppResult<Response> {
        let mut attempt = 0;

        loop {
            // Wait for rate limiter before attempting request
            self.rate_limiter.until_ready().await;

            let (error, retry_after) = match self.client.get(url).query(query).send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    let error = status_to_app_error(status, &self.provider_name);
                    if !is_retryable_status(status) {
                        return Err(error);
                    }
                    let info = RateLimitInfo::from_headers(response.headers());
                    (error, info.retry_after)
                }
                Err(e) => {
                    let error = AppError::from(e);
                    if !is_retryable_error(&error) {
                        return Err(error);
                    }
                    (error, None)
                }
            };

            if attempt >= self.retry_policy.max_retries {
                log::warn!(
                    "{} request failed on final attempt {} ({}), giving up",
                    self.provider_name,
                    attempt + 1,
                    error
                );
                return Err(error);
            }

            let delay = self.retry_policy.calculate_delay(attempt, retry_after);
            log::warn!(
                "{} request failed (attempt {}/{}): {}. Retrying in {:?}",
                self.provider_name,
                attempt + 1,
                self.retry_policy.max_retries + 1,
                error,
                delay
            );
            sleep(delay).await;
            attempt += 1;
        }
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.provider_name, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            let preview: String = response_text.chars().take(200).collect();
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.provider_name, e, preview
            ))
        })
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    /// Get provider name
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}
