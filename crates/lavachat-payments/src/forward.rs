//! Forward Tokens
//!
//! A forward token is the short-lived bearer credential that authorizes one
//! proxied model call on behalf of a specific connection and product. It is
//! derived in-process from the connection secret and the product secret
//! (no network call) and generated fresh per outgoing request.
//!
//! Tokens must never be logged or returned to the client.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::connection::ConnectionSecret;
use crate::error::{PaymentError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Scoped bearer credential for the payments proxy
#[derive(Clone)]
pub struct ForwardToken(String);

impl ForwardToken {
    /// Derive a forward token from a connection secret and product secret.
    ///
    /// Deterministic per input pair. The derivation is a keyed MAC, so
    /// neither secret is recoverable from the token itself. Both inputs
    /// must be non-empty.
    pub fn issue(connection_secret: &ConnectionSecret, product_secret: &str) -> Result<Self> {
        if connection_secret.is_empty() {
            return Err(PaymentError::InvalidSecret(
                "connection secret is empty".into(),
            ));
        }
        if product_secret.is_empty() {
            return Err(PaymentError::InvalidSecret("product secret is empty".into()));
        }

        let mut mac = HmacSha256::new_from_slice(product_secret.as_bytes())
            .map_err(|e| PaymentError::InvalidSecret(e.to_string()))?;
        mac.update(connection_secret.expose().as_bytes());
        let tag = mac.finalize().into_bytes();

        Ok(Self(format!("fwd_{}", hex::encode(tag))))
    }

    /// Access the raw token for the Authorization header
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ForwardToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ForwardToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> ConnectionSecret {
        ConnectionSecret::new(s)
    }

    #[test]
    fn test_issue_is_deterministic() {
        let a = ForwardToken::issue(&secret("cs_1"), "ps_1").unwrap();
        let b = ForwardToken::issue(&secret("cs_1"), "ps_1").unwrap();
        assert_eq!(a.reveal(), b.reveal());
    }

    #[test]
    fn test_issue_varies_with_inputs() {
        let base = ForwardToken::issue(&secret("cs_1"), "ps_1").unwrap();
        let other_conn = ForwardToken::issue(&secret("cs_2"), "ps_1").unwrap();
        let other_product = ForwardToken::issue(&secret("cs_1"), "ps_2").unwrap();

        assert_ne!(base.reveal(), other_conn.reveal());
        assert_ne!(base.reveal(), other_product.reveal());
    }

    #[test]
    fn test_token_shape() {
        let token = ForwardToken::issue(&secret("cs_1"), "ps_1").unwrap();
        assert!(token.reveal().starts_with("fwd_"));
        // fwd_ prefix + 32-byte MAC in hex
        assert_eq!(token.reveal().len(), 4 + 64);
    }

    #[test]
    fn test_empty_inputs_rejected() {
        assert!(ForwardToken::issue(&secret(""), "ps_1").is_err());
        assert!(ForwardToken::issue(&secret("cs_1"), "").is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = ForwardToken::issue(&secret("cs_1"), "ps_1").unwrap();
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("fwd_"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_token_does_not_embed_secrets() {
        let token = ForwardToken::issue(&secret("cs_plaintext"), "ps_plaintext").unwrap();
        assert!(!token.reveal().contains("cs_plaintext"));
        assert!(!token.reveal().contains("ps_plaintext"));
    }
}
