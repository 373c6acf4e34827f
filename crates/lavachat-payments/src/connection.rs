//! Connection Records
//!
//! A connection links an end-user wallet to a secret credential, both owned
//! by the payments service. Records are read-only here; the secret never
//! leaves the server process.

use serde::Deserialize;

/// Per-connection secret credential.
///
/// Deliberately implements `Deserialize` but not `Serialize`: the secret
/// can arrive from the payments API but cannot be sent back out through any
/// serialized response. `Debug` output is redacted.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct ConnectionSecret(String);

impl ConnectionSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Access the raw secret for token derivation
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ConnectionSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ConnectionSecret(<redacted>)")
    }
}

/// A connection record as returned by the payments API
#[derive(Clone, Debug, Deserialize)]
pub struct Connection {
    /// Opaque connection identifier
    pub id: String,

    /// Secret credential used to derive forward tokens
    #[serde(rename = "connection_secret")]
    pub secret: ConnectionSecret,

    /// Wallet metadata (absent while onboarding is incomplete)
    #[serde(default)]
    pub wallet: Option<Wallet>,
}

/// Wallet metadata attached to a connection
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Wallet {
    /// Current balance; the API emits this as a string or a number
    #[serde(default)]
    pub balance: Option<Balance>,

    /// Email the wallet was onboarded with
    #[serde(default)]
    pub email: Option<String>,
}

/// Wallet balance in either wire representation
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Balance {
    Amount(f64),
    Text(String),
}

impl Balance {
    /// Numeric projection used by the client-facing routes
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Balance::Amount(v) => Some(*v),
            Balance::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = ConnectionSecret::new("cs_super_secret");
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("cs_super_secret"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_connection_deserializes_string_balance() {
        let json = r#"{
            "id": "cn_1",
            "connection_secret": "cs_abc",
            "wallet": { "balance": "12.50", "email": "user@example.com" }
        }"#;

        let conn: Connection = serde_json::from_str(json).unwrap();
        let wallet = conn.wallet.unwrap();
        assert_eq!(wallet.balance.unwrap().as_f64(), Some(12.5));
        assert_eq!(wallet.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_connection_deserializes_numeric_balance() {
        let json = r#"{"id":"cn_1","connection_secret":"cs_abc","wallet":{"balance":3.25}}"#;
        let conn: Connection = serde_json::from_str(json).unwrap();
        assert_eq!(conn.wallet.unwrap().balance.unwrap().as_f64(), Some(3.25));
    }

    #[test]
    fn test_unparseable_balance_projects_to_none() {
        let balance = Balance::Text("not-a-number".into());
        assert_eq!(balance.as_f64(), None);
    }

    #[test]
    fn test_wallet_is_optional() {
        let conn: Connection =
            serde_json::from_str(r#"{"id":"cn_1","connection_secret":"cs_abc"}"#).unwrap();
        assert!(conn.wallet.is_none());
    }
}
