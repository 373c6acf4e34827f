//! Error Types

use thiserror::Error;

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Chat/completion error types
#[derive(Error, Debug)]
pub enum ChatError {
    /// Completion backend error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Backend unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Response parse error (malformed completion payload or stream frame)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// Convert to a user-friendly message
    ///
    /// Raw provider errors can embed upstream response bodies; this is the
    /// only text allowed to reach the client.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Provider(_) | ChatError::Parse(_) => {
                "The AI service encountered an error. Please try again.".into()
            }
            ChatError::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            ChatError::Auth(_) => "Authentication with the AI service failed.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_provider_detail() {
        let err = ChatError::Provider("status 500: secret_key=sk_live_x".into());
        assert!(!err.user_message().contains("sk_live_x"));
    }
}
