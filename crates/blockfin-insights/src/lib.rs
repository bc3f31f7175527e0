//! BlockFin AI Insights
//!
//! The AI-insights proxy accepts a prompt plus optional context (chart data,
//! news text, a contract address, transaction data, an image) and forwards
//! it to an upstream chat-completion API.
//!
//! ```text
//! InsightRequest ──► RouteTable[type] ──► {system prompt, provider}
//!                                               │
//!                                  LLMRouter.complete(provider, ...)
//!                                               │
//!                                      InsightResponse { response }
//! ```
//!
//! Callers on the panel side go through [`InsightsClient`], which replaces
//! any failure with a canned answer for the request type.

pub mod client;
pub mod error;
pub mod fallback;
pub mod prompts;
pub mod routing;
pub mod service;
pub mod types;

pub use client::{HttpTransport, InsightOutcome, InsightsClient, InsightsTransport};
pub use error::{InsightsError, Result};
pub use routing::{InsightRoute, RouteTable};
pub use service::{InsightPlan, InsightsService};
pub use types::{InsightRequest, InsightResponse, InsightType};
