//! Request and response bodies of `POST /api/ai-insights`

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kind of insight being requested; selects template and provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InsightType {
    General,
    Trading,
    Security,
    Contract,
    Fraud,
    Chart,
    News,
    Assistant,
}

impl InsightType {
    pub const ALL: [InsightType; 8] = [
        Self::General,
        Self::Trading,
        Self::Security,
        Self::Contract,
        Self::Fraud,
        Self::Chart,
        Self::News,
        Self::Assistant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Trading => "trading",
            Self::Security => "security",
            Self::Contract => "contract",
            Self::Fraud => "fraud",
            Self::Chart => "chart",
            Self::News => "news",
            Self::Assistant => "assistant",
        }
    }
}

/// Unknown type names are treated as general questions
impl From<&str> for InsightType {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "trading" | "trade" | "signals" => Self::Trading,
            "security" => Self::Security,
            "contract" | "audit" | "smart-contract" => Self::Contract,
            "fraud" | "transaction" => Self::Fraud,
            "chart" | "chart-analysis" | "vision" => Self::Chart,
            "news" | "sentiment" => Self::News,
            "assistant" | "navigation" | "help" => Self::Assistant,
            _ => Self::General,
        }
    }
}

impl From<String> for InsightType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<InsightType> for String {
    fn from(t: InsightType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for InsightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insight request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    /// User question
    #[validate(length(min = 1, max = 16000, message = "prompt must be 1-16000 characters"))]
    pub prompt: String,
    /// Insight type
    #[serde(rename = "type", default = "default_type")]
    pub insight_type: InsightType,
    /// Chart screenshot (http(s) or data URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "imageUrl must be a URL"))]
    pub image_url: Option<String>,
    /// Price series or indicator values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<serde_json::Value>,
    /// Article body for sentiment analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_text: Option<String>,
    /// Contract under audit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    /// Transaction under review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_data: Option<serde_json::Value>,
    /// Page the user is looking at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<String>,
}

fn default_type() -> InsightType {
    InsightType::General
}

impl InsightRequest {
    pub fn new(insight_type: InsightType, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            insight_type,
            image_url: None,
            chart_data: None,
            news_text: None,
            contract_address: None,
            transaction_data: None,
            current_page: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_chart_data(mut self, data: serde_json::Value) -> Self {
        self.chart_data = Some(data);
        self
    }

    pub fn with_news_text(mut self, text: impl Into<String>) -> Self {
        self.news_text = Some(text.into());
        self
    }

    pub fn with_contract_address(mut self, address: impl Into<String>) -> Self {
        self.contract_address = Some(address.into());
        self
    }

    pub fn with_transaction_data(mut self, data: serde_json::Value) -> Self {
        self.transaction_data = Some(data);
        self
    }

    pub fn with_current_page(mut self, page: impl Into<String>) -> Self {
        self.current_page = Some(page.into());
        self
    }
}

/// Insight response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_names() {
        let request: InsightRequest = serde_json::from_value(serde_json::json!({
            "prompt": "Audit this token",
            "type": "security",
            "contractAddress": "0xdeadbeef",
            "currentPage": "/security"
        }))
        .unwrap();

        assert_eq!(request.insight_type, InsightType::Security);
        assert_eq!(request.contract_address.as_deref(), Some("0xdeadbeef"));
        assert_eq!(request.current_page.as_deref(), Some("/security"));
        assert!(request.image_url.is_none());
    }

    #[test]
    fn test_unknown_type_is_general() {
        let request: InsightRequest =
            serde_json::from_value(serde_json::json!({"prompt": "hi", "type": "horoscope"}))
                .unwrap();
        assert_eq!(request.insight_type, InsightType::General);

        let missing: InsightRequest =
            serde_json::from_value(serde_json::json!({"prompt": "hi"})).unwrap();
        assert_eq!(missing.insight_type, InsightType::General);
    }

    #[test]
    fn test_empty_prompt_fails_validation() {
        let request = InsightRequest::new(InsightType::Trading, "");
        assert!(request.validate().is_err());

        let request = InsightRequest::new(InsightType::Trading, "BTC outlook?");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_type_serializes_as_string() {
        let json = serde_json::to_value(InsightRequest::new(InsightType::News, "x")).unwrap();
        assert_eq!(json["type"], "news");
    }
}
