use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// A newer search superseded this one. Never shown to the user.
    #[error("Request cancelled")]
    Cancelled,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    ConnectionError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Initialization failed: {0}")]
    InitializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse grouping used to pick what the user sees for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    Cancellation,
    Validation,
    Timeout,
    RateLimited,
    ServerError,
    Transport,
    Storage,
    Initialization,
}

impl FailureCategory {
    /// Fixed message table for user-visible failures.
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureCategory::Cancellation => "",
            FailureCategory::Validation => "Please enter a valid search term.",
            FailureCategory::Timeout => {
                "The request timed out. Please check your connection and try again."
            }
            FailureCategory::RateLimited => {
                "Too many requests. Please wait a moment before searching again."
            }
            FailureCategory::ServerError => "The server encountered an error. Please try later.",
            FailureCategory::Transport => "Something went wrong while searching. Please try again.",
            FailureCategory::Storage => {
                "Your preferences could not be saved. Changes will last for this session only."
            }
            FailureCategory::Initialization => {
                "The search interface could not be started. Please reload the page."
            }
        }
    }

    /// Transport failures get a retry affordance, the rest do not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FailureCategory::Timeout
                | FailureCategory::RateLimited
                | FailureCategory::ServerError
                | FailureCategory::Transport
        )
    }
}

impl AppError {
    pub fn category(&self) -> FailureCategory {
        match self {
            AppError::Cancelled => FailureCategory::Cancellation,
            AppError::ValidationError(_) => FailureCategory::Validation,
            AppError::Timeout(_) => FailureCategory::Timeout,
            AppError::RateLimitError(_) => FailureCategory::RateLimited,
            AppError::ServerError { .. } => FailureCategory::ServerError,
            AppError::ConnectionError(_)
            | AppError::ApiError(_)
            | AppError::NotFound(_)
            | AppError::SerializationError(_)
            | AppError::InternalError(_) => FailureCategory::Transport,
            AppError::StorageError(_) => FailureCategory::Storage,
            AppError::InitializationError(_) => FailureCategory::Initialization,
        }
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }

    pub fn user_message(&self) -> &'static str {
        self.category().user_message()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_connect() {
            AppError::ConnectionError(err.to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => AppError::RateLimitError("Too many requests".to_string()),
                404 => AppError::NotFound("External resource not found".to_string()),
                code @ 500..=599 => AppError::ServerError {
                    status: code,
                    message: err.to_string(),
                },
                _ => AppError::ApiError(format!("HTTP {}: {}", status, err)),
            }
        } else if err.is_decode() {
            AppError::SerializationError(err.to_string())
        } else {
            AppError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_maps_to_connection_message() {
        let err = AppError::Timeout("deadline elapsed".to_string());
        assert_eq!(err.category(), FailureCategory::Timeout);
        assert!(err.user_message().contains("check your connection"));
    }

    #[test]
    fn test_rate_limit_and_server_messages() {
        let rate_limited = AppError::RateLimitError("429".to_string());
        assert!(rate_limited.user_message().contains("Too many requests"));

        let server = AppError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(server.user_message().contains("try later"));
    }

    #[test]
    fn test_other_transport_failures_are_generic() {
        let err = AppError::ConnectionError("refused".to_string());
        assert_eq!(err.category(), FailureCategory::Transport);
        assert!(err.category().is_retryable());
    }

    #[test]
    fn test_cancellation_is_not_retryable() {
        assert!(AppError::Cancelled.is_cancellation());
        assert!(!AppError::Cancelled.category().is_retryable());
        assert!(!FailureCategory::Validation.is_retryable());
    }
}
