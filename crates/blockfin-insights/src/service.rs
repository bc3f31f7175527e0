//! The proxy itself: route, assemble, forward

use blockfin_llm::{CompletionRequest, LLMRouter, Message, ProviderKind};
use validator::Validate;

use crate::error::Result;
use crate::routing::RouteTable;
use crate::types::{InsightRequest, InsightResponse, InsightType};

/// What the proxy will send for a request
#[derive(Debug, Clone)]
pub struct InsightPlan {
    pub insight_type: InsightType,
    /// Provider named by the route table
    pub routed_provider: ProviderKind,
    /// Provider that will actually be called
    pub provider: ProviderKind,
    pub request: CompletionRequest,
}

/// Stateless AI-insights proxy
#[derive(Clone)]
pub struct InsightsService {
    router: LLMRouter,
    routes: RouteTable,
}

impl InsightsService {
    pub fn new(router: LLMRouter) -> Self {
        Self {
            router,
            routes: RouteTable::default(),
        }
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn router(&self) -> &LLMRouter {
        &self.router
    }

    /// Resolve the route and build the upstream request
    ///
    /// When the routed provider has no key configured the plan keeps it, so
    /// forwarding fails with `ProviderNotAvailable`. The deterministic
    /// provider stands in only when it was registered explicitly.
    pub fn plan(&self, request: &InsightRequest) -> InsightPlan {
        let route = self.routes.route(request.insight_type);

        let provider = if self.router.provider(route.provider).is_none()
            && self.router.provider(ProviderKind::Deterministic).is_some()
        {
            tracing::warn!(
                insight_type = %request.insight_type,
                provider = %route.provider,
                "routed provider not configured, answering deterministically"
            );
            ProviderKind::Deterministic
        } else {
            route.provider
        };

        let mut message = Message::user(user_content(request));
        if let Some(ref url) = request.image_url {
            message = message.with_image(url.clone());
        }

        let completion = CompletionRequest::new(vec![message])
            .with_system(route.system_prompt)
            .with_temperature(route.temperature)
            .with_max_tokens(route.max_tokens);

        InsightPlan {
            insight_type: request.insight_type,
            routed_provider: route.provider,
            provider,
            request: completion,
        }
    }

    /// Validate, route and forward one request
    pub async fn generate(&self, request: InsightRequest) -> Result<InsightResponse> {
        request.validate()?;

        let plan = self.plan(&request);
        metrics::counter!(
            "blockfin_insight_requests_total",
            "type" => plan.insight_type.as_str(),
            "provider" => plan.provider.to_string()
        )
        .increment(1);

        tracing::info!(
            insight_type = %plan.insight_type,
            provider = %plan.provider,
            has_image = plan.request.has_image(),
            "forwarding insight request"
        );

        match self.router.complete(plan.provider, plan.request).await {
            Ok(completion) => Ok(InsightResponse {
                response: completion.content,
            }),
            Err(e) => {
                metrics::counter!(
                    "blockfin_insight_failures_total",
                    "type" => plan.insight_type.as_str()
                )
                .increment(1);
                tracing::error!(
                    insight_type = %plan.insight_type,
                    provider = %plan.provider,
                    error = %e,
                    "insight request failed"
                );
                Err(e.into())
            }
        }
    }
}

/// The prompt followed by whichever context fields are present
fn user_content(request: &InsightRequest) -> String {
    let mut content = request.prompt.trim().to_string();

    if let Some(ref data) = request.chart_data {
        content.push_str("\n\nChart data:\n");
        content.push_str(&pretty(data));
    }
    if let Some(ref text) = request.news_text {
        content.push_str("\n\nNews article:\n");
        content.push_str(text.trim());
    }
    if let Some(ref address) = request.contract_address {
        content.push_str("\n\nContract address: ");
        content.push_str(address.trim());
    }
    if let Some(ref data) = request.transaction_data {
        content.push_str("\n\nTransaction data:\n");
        content.push_str(&pretty(data));
    }
    if let Some(ref page) = request.current_page {
        content.push_str("\n\nCurrent page: ");
        content.push_str(page.trim());
    }

    content
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts;
    use crate::InsightsError;
    use blockfin_llm::{DeepSeekConfig, LLMRouterBuilder, OpenAIConfig};

    fn keyed_router() -> LLMRouter {
        LLMRouterBuilder::new()
            .with_openai(OpenAIConfig {
                api_key: "sk-openai".to_string(),
                model: OpenAIConfig::DEFAULT_MODEL.to_string(),
                base_url: OpenAIConfig::DEFAULT_BASE_URL.to_string(),
            })
            .with_deepseek(DeepSeekConfig {
                api_key: "sk-deepseek".to_string(),
                model: DeepSeekConfig::DEFAULT_MODEL.to_string(),
                base_url: DeepSeekConfig::DEFAULT_BASE_URL.to_string(),
            })
            .build()
    }

    #[test]
    fn test_security_plan_uses_deepseek_and_security_prompt() {
        let service = InsightsService::new(keyed_router());
        let request = InsightRequest::new(InsightType::Security, "Is this airdrop legit?")
            .with_contract_address("0xabc");

        let plan = service.plan(&request);

        assert_eq!(plan.provider, ProviderKind::DeepSeek);
        assert_eq!(plan.request.system.as_deref(), Some(prompts::SECURITY));
        let user = &plan.request.messages[0].content;
        assert!(user.starts_with("Is this airdrop legit?"));
        assert!(user.contains("Contract address: 0xabc"));
    }

    #[test]
    fn test_unconfigured_provider_is_kept_in_plan() {
        let service = InsightsService::new(LLMRouterBuilder::new().build());
        let plan = service.plan(&InsightRequest::new(InsightType::Security, "hi"));

        assert_eq!(plan.routed_provider, ProviderKind::DeepSeek);
        assert_eq!(plan.provider, ProviderKind::DeepSeek);
    }

    #[test]
    fn test_opt_in_deterministic_stands_in() {
        let service = InsightsService::new(LLMRouterBuilder::new().with_deterministic().build());
        let plan = service.plan(&InsightRequest::new(InsightType::Security, "hi"));

        assert_eq!(plan.routed_provider, ProviderKind::DeepSeek);
        assert_eq!(plan.provider, ProviderKind::Deterministic);
    }

    #[test]
    fn test_chart_plan_attaches_image_and_data() {
        let service = InsightsService::new(keyed_router());
        let request = InsightRequest::new(InsightType::Chart, "What pattern?")
            .with_image_url("https://img.example/sol.png")
            .with_chart_data(serde_json::json!({"close": [98.1, 99.4]}));

        let plan = service.plan(&request);

        assert_eq!(plan.provider, ProviderKind::OpenAI);
        assert!(plan.request.has_image());
        assert!(plan.request.messages[0].content.contains("\"close\""));
    }

    #[tokio::test]
    async fn test_generate_without_keys_is_upstream_failure() {
        let service = InsightsService::new(LLMRouterBuilder::new().build());
        let err = service
            .generate(InsightRequest::new(InsightType::Security, "audit 0xabc"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InsightsError::Upstream(blockfin_llm::LLMError::ProviderNotAvailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_with_opt_in_deterministic() {
        let service = InsightsService::new(LLMRouterBuilder::new().with_deterministic().build());
        let response = service
            .generate(InsightRequest::new(InsightType::Trading, "ETH outlook?"))
            .await
            .unwrap();

        assert!(response.response.contains("ETH outlook?"));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_prompt() {
        let service = InsightsService::new(LLMRouterBuilder::new().build());
        let err = service
            .generate(InsightRequest::new(InsightType::General, ""))
            .await
            .unwrap_err();

        assert!(matches!(err, InsightsError::Invalid(_)));
    }
}
