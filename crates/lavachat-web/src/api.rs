//! API Client
//!
//! Calls the server routes and hands checkout-session tokens to the hosted
//! wallet flow. Connection secrets never appear on this side of the wire;
//! the client only ever holds the opaque connection id.

use serde::{Deserialize, Serialize};

/// Hosted checkout page; redirects back to the origin with
/// `?connection_id=...` on success.
const CHECKOUT_URL: &str = "https://checkout.lavapayments.com";

/// Chat message for display and history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Public projection of a wallet connection
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub connection_id: String,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request an onboarding checkout-session token
pub async fn create_checkout_session() -> Result<String, String> {
    let client = reqwest::Client::new();

    let response = client
        .post("/api/create-checkout-session")
        .send()
        .await
        .map_err(|e| e.to_string())?;

    token_from_response(response).await
}

/// Request a topup checkout-session token for an existing connection
pub async fn create_topup_session(connection_id: &str) -> Result<String, String> {
    let client = reqwest::Client::new();

    let body = serde_json::json!({ "connectionId": connection_id });

    let response = client
        .post("/api/create-topup-session")
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    token_from_response(response).await
}

async fn token_from_response(response: reqwest::Response) -> Result<String, String> {
    if response.status().is_success() {
        let data: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        Ok(data["token"].as_str().unwrap_or_default().to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"]
            .as_str()
            .unwrap_or("Failed to create checkout session")
            .to_string())
    }
}

/// Fetch the wallet details for a connection
pub async fn fetch_connection(connection_id: &str) -> Result<ConnectionInfo, String> {
    let client = reqwest::Client::new();

    let response = client
        .get(format!("/api/connections/{connection_id}"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"]
            .as_str()
            .unwrap_or("Failed to fetch connection details")
            .to_string())
    }
}

/// Send the conversation to the chat route and return the assistant reply
pub async fn send_chat(messages: &[ChatMessage], connection_id: &str) -> Result<String, String> {
    let client = reqwest::Client::new();

    let body = serde_json::json!({
        "messages": messages,
        "connectionId": connection_id,
    });

    let response = client
        .post("/api/chat")
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        Ok(data["text"].as_str().unwrap_or("No response").to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"].as_str().unwrap_or("Request failed").to_string())
    }
}

/// Hand a session token to the hosted checkout flow
pub fn open_checkout(token: &str) {
    if let Some(window) = web_sys::window() {
        let url = format!("{CHECKOUT_URL}/?checkout_session_token={token}");
        let _ = window.location().set_href(&url);
    }
}

/// Connection id delivered by the checkout redirect, if any
pub fn connection_id_from_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == "connection_id" && !value.is_empty()).then(|| value.to_string())
        })
}
