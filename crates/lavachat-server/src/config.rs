//! Server Configuration
//!
//! Read once at process start and treated as immutable for the process
//! lifetime.

use anyhow::Context;

/// Process-wide configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Product secret used together with a connection secret to derive
    /// forward tokens. Server-side only.
    pub product_secret: String,

    /// Origin URL hosted checkout sessions redirect back to
    pub origin_url: String,

    /// Model id used for every completion (never client-selectable)
    pub model: String,

    /// Listen address
    pub bind_addr: String,
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let product_secret =
            std::env::var("LAVA_PRODUCT_SECRET").context("LAVA_PRODUCT_SECRET not set")?;
        let origin_url = std::env::var("LAVA_ORIGIN_URL").context("LAVA_ORIGIN_URL not set")?;
        let model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

        Ok(Self {
            product_secret,
            origin_url,
            model,
            bind_addr,
        })
    }
}
