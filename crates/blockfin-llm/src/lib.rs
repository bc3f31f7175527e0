//! BlockFin LLM - Upstream chat-completion providers
//!
//! This crate hides the two cloud providers the AI-insights proxy talks to
//! behind one trait:
//!
//! - OpenAI (GPT, including vision input)
//! - DeepSeek (OpenAI-compatible wire format)
//!
//! A deterministic provider can be registered explicitly for offline
//! development; it is never added implicitly.

pub mod providers;
pub mod router;
pub mod types;

pub use providers::*;
pub use router::*;
pub use types::*;
