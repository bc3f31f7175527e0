//! Insight type → {system prompt, upstream provider} lookup table

use std::collections::HashMap;

use blockfin_llm::ProviderKind;

use crate::prompts;
use crate::types::InsightType;

/// How one insight type is served
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRoute {
    /// System prompt template
    pub system_prompt: &'static str,
    /// Upstream provider
    pub provider: ProviderKind,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl InsightRoute {
    pub const fn new(system_prompt: &'static str, provider: ProviderKind) -> Self {
        Self {
            system_prompt,
            provider,
            temperature: 0.7,
            max_tokens: 800,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Route table; every [`InsightType`] has an entry
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<InsightType, InsightRoute>,
}

impl RouteTable {
    /// Look up the route for a type
    pub fn route(&self, insight_type: InsightType) -> &InsightRoute {
        self.routes
            .get(&insight_type)
            .or_else(|| self.routes.get(&InsightType::General))
            .unwrap_or(&GENERAL_ROUTE)
    }

    /// Replace the route for a type
    pub fn with_route(mut self, insight_type: InsightType, route: InsightRoute) -> Self {
        self.routes.insert(insight_type, route);
        self
    }
}

const GENERAL_ROUTE: InsightRoute = InsightRoute::new(prompts::GENERAL, ProviderKind::OpenAI);

impl Default for RouteTable {
    fn default() -> Self {
        use InsightType::*;
        use ProviderKind::{DeepSeek, OpenAI};

        let routes = HashMap::from([
            (General, GENERAL_ROUTE),
            (
                Trading,
                InsightRoute::new(prompts::TRADING, OpenAI).with_temperature(0.4),
            ),
            (
                Security,
                InsightRoute::new(prompts::SECURITY, DeepSeek)
                    .with_temperature(0.2)
                    .with_max_tokens(1000),
            ),
            (
                Contract,
                InsightRoute::new(prompts::CONTRACT, DeepSeek)
                    .with_temperature(0.2)
                    .with_max_tokens(1200),
            ),
            (
                Fraud,
                InsightRoute::new(prompts::FRAUD, DeepSeek).with_temperature(0.2),
            ),
            (
                Chart,
                InsightRoute::new(prompts::CHART, OpenAI).with_temperature(0.3),
            ),
            (News, InsightRoute::new(prompts::NEWS, OpenAI).with_temperature(0.3)),
            (
                Assistant,
                InsightRoute::new(prompts::ASSISTANT, OpenAI).with_max_tokens(400),
            ),
        ]);

        Self { routes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_goes_to_deepseek() {
        let table = RouteTable::default();
        let route = table.route(InsightType::Security);
        assert_eq!(route.provider, ProviderKind::DeepSeek);
        assert_eq!(route.system_prompt, prompts::SECURITY);
    }

    #[test]
    fn test_every_type_has_a_route() {
        let table = RouteTable::default();
        for insight_type in InsightType::ALL {
            let route = table.route(insight_type);
            assert!(!route.system_prompt.is_empty());
            assert_ne!(route.provider, ProviderKind::Deterministic);
        }
        assert_eq!(table.route(InsightType::Chart).provider, ProviderKind::OpenAI);
        assert_eq!(table.route(InsightType::Contract).provider, ProviderKind::DeepSeek);
    }

    #[test]
    fn test_override_route() {
        let table = RouteTable::default().with_route(
            InsightType::News,
            InsightRoute::new(prompts::NEWS, ProviderKind::DeepSeek),
        );
        assert_eq!(table.route(InsightType::News).provider, ProviderKind::DeepSeek);
    }
}
