//! # lavachat-core
//!
//! Core types for the lavachat demo: conversation messages and a
//! provider-agnostic completion abstraction.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     lavachat-server                       │
//! │  ┌─────────────┐   ┌──────────────────────────────────┐  │
//! │  │   Message   │──▶│  CompletionProvider (Strategy)   │  │
//! │  │   history   │   │  complete / complete_stream      │  │
//! │  └─────────────┘   └──────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The `CompletionProvider` trait is the seam between route handlers and
//! whatever backend actually serves completions. In this demo the only
//! implementation talks to an OpenAI-compatible endpoint through the
//! payments proxy, but nothing above the trait knows that.

pub mod error;
pub mod message;
pub mod provider;

pub use error::{ChatError, Result};
pub use message::{Message, Role};
pub use provider::CompletionProvider;
