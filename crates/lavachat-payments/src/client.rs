//! Payments API Client
//!
//! Thin REST client for the payments service. One instance is built at
//! process start from explicit configuration and shared for the process
//! lifetime; it holds no mutable state.

use reqwest::{Method, RequestBuilder, StatusCode};

use crate::checkout::{CheckoutSession, CheckoutSessionRequest};
use crate::connection::Connection;
use crate::error::{PaymentError, Result};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://api.lavapayments.com/v1";

/// Pinned API version sent with every request
pub const DEFAULT_API_VERSION: &str = "2025-03-27.v1";

/// Configured handle to the payments service
pub struct LavaClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
    api_version: String,
}

impl LavaClient {
    /// Create a new client against the default API base
    pub fn new(secret_key: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_API_BASE.to_string(),
            secret_key: secret_key.into(),
            api_version: api_version.into(),
        }
    }

    /// Override the API base URL (tests, staging)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create from environment variables
    ///
    /// `LAVA_SECRET_KEY` is required; `LAVA_API_VERSION` and
    /// `LAVA_API_BASE` fall back to the pinned defaults.
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("LAVA_SECRET_KEY")
            .map_err(|_| PaymentError::Config("LAVA_SECRET_KEY not set".into()))?;
        let api_version =
            std::env::var("LAVA_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.into());
        let base_url = std::env::var("LAVA_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        Ok(Self::new(secret_key, api_version).with_base_url(base_url))
    }

    /// Base URL of the OpenAI-compatible completion proxy.
    ///
    /// Model calls routed through here are metered and billed against the
    /// wallet named by the forward token they carry.
    pub fn completions_url(&self) -> String {
        format!("{}/forward/openai/v1", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{path}", self.base_url))
            .bearer_auth(&self.secret_key)
            .header("Lava-Version", &self.api_version)
    }

    /// Resolve a connection id to its record (secret included).
    ///
    /// Server-side only: callers project the result before anything leaves
    /// the process.
    pub async fn retrieve_connection(&self, connection_id: &str) -> Result<Connection> {
        tracing::debug!(connection_id, "retrieving connection");

        let response = self
            .request(Method::GET, &format!("connections/{connection_id}"))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(PaymentError::ConnectionNotFound(connection_id.into())),
            status => Err(PaymentError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Create a hosted checkout session
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession> {
        tracing::debug!(mode = ?request.checkout_mode, "creating checkout session");

        let response = self
            .request(Method::POST, "checkout_sessions")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json().await?)
    }
}
