//! Insight errors

use blockfin_llm::LLMError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("invalid insight request: {0}")]
    Invalid(String),

    #[error("upstream provider failed: {0}")]
    Upstream(#[from] LLMError),

    #[error("proxy unreachable: {0}")]
    Transport(String),

    #[error("proxy returned {status}: {message}")]
    Proxy { status: u16, message: String },

    #[error("could not decode proxy response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, InsightsError>;

impl From<validator::ValidationErrors> for InsightsError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map(|m| m.as_ref()).unwrap_or("invalid")
                    )
                })
            })
            .collect();
        Self::Invalid(messages.join(", "))
    }
}
