//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Payments API rejected the request
    #[error("Payments API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Connection id unknown to the payments service
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    /// Secret material missing or malformed
    #[error("Invalid secret: {0}")]
    InvalidSecret(String),
}

impl PaymentError {
    /// Whether this is the not-found case (routes map it to 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, PaymentError::ConnectionNotFound(_))
    }

    /// Get user-friendly message
    ///
    /// Upstream error bodies can carry account detail; only this text may
    /// be returned to the client.
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::ConnectionNotFound(_) => "Connection not found",
            PaymentError::Config(_) => "Service configuration error.",
            PaymentError::InvalidSecret(_) => "Payment credentials are invalid.",
            _ => "Payment processing failed. Please try again.",
        }
    }
}
