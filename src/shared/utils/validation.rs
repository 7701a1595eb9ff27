use crate::shared::errors::AppError;

/// Characters removed from user queries before they reach the API.
const FORBIDDEN_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

pub const MAX_QUERY_CHARS: usize = 100;

pub struct Validator;

impl Validator {
    /// Strip markup-significant characters, collapse whitespace, truncate to
    /// [`MAX_QUERY_CHARS`] characters and trim. Idempotent.
    pub fn sanitize_query(input: &str) -> String {
        let stripped: String = input
            .chars()
            .filter(|c| !FORBIDDEN_CHARS.contains(c))
            .collect();

        let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        let truncated: String = collapsed.chars().take(MAX_QUERY_CHARS).collect();

        truncated.trim().to_string()
    }

    /// Sanitize and reject queries that end up empty or shorter than
    /// `min_chars` characters.
    pub fn validate_query(input: &str, min_chars: usize) -> Result<String, AppError> {
        let sanitized = Self::sanitize_query(input);
        if sanitized.is_empty() {
            return Err(AppError::ValidationError(
                "Search query cannot be empty".to_string(),
            ));
        }
        if sanitized.chars().count() < min_chars {
            return Err(AppError::ValidationError(format!(
                "Search query must be at least {} characters",
                min_chars
            )));
        }
        Ok(sanitized)
    }

    /// Whether a raw keystroke value is long enough to trigger a search.
    pub fn meets_min_length(input: &str, min_chars: usize) -> bool {
        input.trim().chars().count() >= min_chars
    }
}
