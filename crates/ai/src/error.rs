//! Analyzer error types.

use std::time::Duration;
use thiserror::Error;
use wealthjournal_core::errors::AnalyzerError;

/// Errors raised while talking to the Gemini API.
#[derive(Debug, Error)]
pub enum AiError {
    /// Missing API key for the provider.
    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("Provider request failed: {0}")]
    Http(String),

    /// Non-success HTTP status returned by the provider.
    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// No response within the configured timeout.
    #[error("Provider did not respond within {} seconds", .0.as_secs())]
    Timeout(Duration),

    /// The prompt was rejected by the provider's safety filters.
    #[error("Prompt was blocked by the provider: {0}")]
    Blocked(String),

    /// The response carried no text.
    #[error("No response from AI")]
    EmptyResponse,

    /// The response text is not the expected structured shape.
    #[error("Invalid analysis payload: {0}")]
    InvalidResponse(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AiError {
    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Error code for programmatic handling and log fields.
impl AiError {
    pub fn code(&self) -> &'static str {
        match self {
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::Http(_) => "HTTP_ERROR",
            AiError::Status { .. } => "PROVIDER_ERROR",
            AiError::Timeout(_) => "TIMEOUT",
            AiError::Blocked(_) => "PROMPT_BLOCKED",
            AiError::EmptyResponse => "EMPTY_RESPONSE",
            AiError::InvalidResponse(_) => "INVALID_RESPONSE",
            AiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<AiError> for AnalyzerError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::MissingApiKey(var) => AnalyzerError::MissingCredential(var),
            AiError::Timeout(after) => AnalyzerError::Timeout(after),
            AiError::EmptyResponse | AiError::InvalidResponse(_) => {
                AnalyzerError::MalformedResponse(err.to_string())
            }
            AiError::Http(_) | AiError::Status { .. } | AiError::Blocked(_) | AiError::Internal(_) => {
                AnalyzerError::Request(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_analyzer_error() {
        assert_eq!(
            AnalyzerError::from(AiError::MissingApiKey("GEMINI_API_KEY".into())),
            AnalyzerError::MissingCredential("GEMINI_API_KEY".into())
        );
        assert_eq!(
            AnalyzerError::from(AiError::Timeout(Duration::from_secs(60))),
            AnalyzerError::Timeout(Duration::from_secs(60))
        );
        assert!(matches!(
            AnalyzerError::from(AiError::EmptyResponse),
            AnalyzerError::MalformedResponse(msg) if msg == "No response from AI"
        ));
        assert!(matches!(
            AnalyzerError::from(AiError::Status { status: 503, message: "overloaded".into() }),
            AnalyzerError::Request(msg) if msg.contains("503")
        ));
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AiError::EmptyResponse.code(), "EMPTY_RESPONSE");
        assert_eq!(AiError::Blocked("SAFETY".into()).code(), "PROMPT_BLOCKED");
    }
}
