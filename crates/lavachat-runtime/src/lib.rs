//! # lavachat-runtime
//!
//! Completion backends for the lavachat system.
//!
//! The only backend is an OpenAI-compatible chat-completions client. In
//! production it is pointed at the payments service's forwarding proxy with
//! a forward token as its bearer credential, so every call is metered and
//! billed against the wallet the token was derived for. The client itself
//! is provider-agnostic: any OpenAI-compatible base URL works.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lavachat_runtime::OpenAiProvider;
//!
//! // base URL from the payments client, bearer from the token issuer
//! let provider = OpenAiProvider::new(lava.completions_url(), token.reveal());
//! let completion = provider.complete(&messages, &options).await?;
//! ```

pub mod openai;

pub use openai::OpenAiProvider;

// Re-export core types for convenience
pub use lavachat_core::{ChatError, CompletionProvider, Message, Result, Role};
