//! LLM error types

use thiserror::Error;

/// Errors that can occur during LLM operations
///
/// Every variant is fatal for the current run: the conversation loop stops
/// on the first service failure without retrying.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = LlmError::ApiError {
            status: 403,
            message: "API key not valid".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("API key not valid"));
    }

    #[test]
    fn test_invalid_response_message() {
        let err = LlmError::InvalidResponse("no candidates in response".to_string());
        assert!(err.to_string().contains("no candidates"));
    }
}
