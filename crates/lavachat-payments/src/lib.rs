//! # lavachat-payments
//!
//! Client for the external payments service that owns every wallet concern
//! in this system: connections, hosted checkout sessions, and the metering
//! proxy that model-completion traffic is billed through.
//!
//! ## Hosted checkout flow
//!
//! **Flow:** Your site → hosted checkout page → redirect back with a
//! connection id
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │  Your Site  │────▶│  Hosted Checkout │────▶│  Your Site       │
//! │  (connect)  │     │  (wallet funding)│     │  (?connection_id)│
//! └─────────────┘     └──────────────────┘     └──────────────────┘
//! ```
//!
//! The checkout widget's internal protocol is entirely the provider's; this
//! crate only issues the session token that opens it.
//!
//! ## Metered model calls
//!
//! ```text
//! ┌──────────┐   forward token   ┌────────────────┐      ┌───────────┐
//! │  server  │──────────────────▶│ payments proxy │─────▶│ model API │
//! └──────────┘                   │ (meter + bill) │      └───────────┘
//!                                └────────────────┘
//! ```
//!
//! A forward token is derived from the connection secret and the product
//! secret, and authorizes proxied model calls billed against that wallet.
//! Secrets and tokens are server-side material; nothing in this crate
//! serializes them back out.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lavachat_payments::{CheckoutSessionRequest, ForwardToken, LavaClient};
//!
//! let lava = LavaClient::from_env()?;
//!
//! // Hosted onboarding checkout
//! let session = lava
//!     .create_checkout_session(&CheckoutSessionRequest::onboarding("https://yoursite.com"))
//!     .await?;
//! // Hand session.checkout_session_token to the client-side widget.
//!
//! // Metered model call
//! let connection = lava.retrieve_connection("cn_123").await?;
//! let token = ForwardToken::issue(&connection.secret, "ps_456")?;
//! ```

mod checkout;
mod client;
mod connection;
mod error;
mod forward;

pub use checkout::{CheckoutMode, CheckoutSession, CheckoutSessionRequest};
pub use client::LavaClient;
pub use connection::{Balance, Connection, ConnectionSecret, Wallet};
pub use error::{PaymentError, Result};
pub use forward::ForwardToken;
