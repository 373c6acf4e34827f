//! Hosted Checkout Sessions
//!
//! Checkout sessions open the provider's hosted wallet flow. Two modes
//! exist: `onboarding` creates a new connection, `topup` adds funds to an
//! existing one. Session lifecycle (expiry, consumption) is owned entirely
//! by the payments service; this module only shapes the request and carries
//! back the opaque session token.

use serde::{Deserialize, Serialize};

/// Checkout session mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    /// Connect a new wallet
    Onboarding,
    /// Add funds to an existing wallet
    Topup,
}

/// Request to create a checkout session
///
/// Use [`CheckoutSessionRequest::onboarding`] or
/// [`CheckoutSessionRequest::topup`]; a topup without a connection id is
/// unrepresentable.
#[derive(Clone, Debug, Serialize)]
pub struct CheckoutSessionRequest {
    pub checkout_mode: CheckoutMode,

    /// Origin the hosted flow redirects back to
    pub origin_url: String,

    /// Existing connection to fund (topup mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
}

impl CheckoutSessionRequest {
    /// Session that onboards a new wallet connection
    pub fn onboarding(origin_url: impl Into<String>) -> Self {
        Self {
            checkout_mode: CheckoutMode::Onboarding,
            origin_url: origin_url.into(),
            connection_id: None,
        }
    }

    /// Session that tops up an existing wallet
    pub fn topup(origin_url: impl Into<String>, connection_id: impl Into<String>) -> Self {
        Self {
            checkout_mode: CheckoutMode::Topup,
            origin_url: origin_url.into(),
            connection_id: Some(connection_id.into()),
        }
    }
}

/// Result of creating a checkout session
#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutSession {
    /// Opaque single-use token handed to the hosted checkout widget
    pub checkout_session_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onboarding_request_wire_shape() {
        let req = CheckoutSessionRequest::onboarding("https://demo.test");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["checkout_mode"], "onboarding");
        assert_eq!(json["origin_url"], "https://demo.test");
        assert!(json.get("connection_id").is_none());
    }

    #[test]
    fn test_topup_request_carries_connection_id() {
        let req = CheckoutSessionRequest::topup("https://demo.test", "cn_42");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["checkout_mode"], "topup");
        assert_eq!(json["connection_id"], "cn_42");
    }

    #[test]
    fn test_session_deserializes_token() {
        let session: CheckoutSession =
            serde_json::from_str(r#"{"checkout_session_token":"cst_abc"}"#).unwrap();
        assert_eq!(session.checkout_session_token, "cst_abc");
    }
}
