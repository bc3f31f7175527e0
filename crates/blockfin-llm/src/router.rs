//! LLM Router - Holds the configured providers and dispatches by kind

use std::collections::HashMap;
use std::sync::Arc;

use crate::providers::*;
use crate::types::*;

/// The LLM Router owns one provider per [`ProviderKind`]
#[derive(Clone)]
pub struct LLMRouter {
    providers: HashMap<ProviderKind, Arc<dyn LLMProvider>>,
}

impl LLMRouter {
    /// Get the provider registered for a kind
    pub fn provider(&self, kind: ProviderKind) -> Option<&Arc<dyn LLMProvider>> {
        self.providers.get(&kind)
    }

    /// Kinds with a registered provider
    pub fn kinds(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<_> = self.providers.keys().copied().collect();
        kinds.sort_by_key(|k| k.to_string());
        kinds
    }

    /// Check if the provider for a kind is registered and available
    pub async fn is_available(&self, kind: ProviderKind) -> bool {
        match self.providers.get(&kind) {
            Some(provider) => provider.is_available().await,
            None => false,
        }
    }

    /// Complete a request using the provider for `kind`
    pub async fn complete(
        &self,
        kind: ProviderKind,
        request: CompletionRequest,
    ) -> Result<CompletionResponse> {
        let provider = self
            .providers
            .get(&kind)
            .ok_or_else(|| LLMError::ProviderNotAvailable {
                provider: kind.to_string(),
            })?;

        tracing::debug!(provider = provider.name(), "dispatching completion");
        provider.complete(request).await
    }
}

/// Builder for LLM router with explicit configuration
pub struct LLMRouterBuilder {
    providers: HashMap<ProviderKind, Arc<dyn LLMProvider>>,
}

impl LLMRouterBuilder {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    pub fn with_openai(self, config: OpenAIConfig) -> Self {
        self.with_provider(Arc::new(OpenAIProvider::new(config)))
    }

    pub fn with_deepseek(self, config: DeepSeekConfig) -> Self {
        self.with_provider(Arc::new(DeepSeekProvider::new(config)))
    }

    /// Register the offline provider; only used when explicitly enabled
    pub fn with_deterministic(self) -> Self {
        self.with_provider(Arc::new(DeterministicProvider::new()))
    }

    /// Register any provider under its own kind, replacing an earlier one
    pub fn with_provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    pub fn build(self) -> LLMRouter {
        LLMRouter {
            providers: self.providers,
        }
    }
}

impl Default for LLMRouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_registers_nothing() {
        let router = LLMRouterBuilder::new().build();
        assert!(router.kinds().is_empty());
        assert!(router.provider(ProviderKind::Deterministic).is_none());
    }

    #[tokio::test]
    async fn test_deterministic_is_opt_in() {
        let router = LLMRouterBuilder::new().with_deterministic().build();
        assert!(router.is_available(ProviderKind::Deterministic).await);

        let request = CompletionRequest::new(vec![Message::user("Hello")]);
        let response = router
            .complete(ProviderKind::Deterministic, request)
            .await
            .unwrap();

        assert!(response.content.contains("deterministic"));
    }

    #[tokio::test]
    async fn test_missing_provider_is_an_error() {
        let router = LLMRouterBuilder::new().build();
        assert!(!router.is_available(ProviderKind::DeepSeek).await);

        let request = CompletionRequest::new(vec![Message::user("Hello")]);
        let err = router
            .complete(ProviderKind::DeepSeek, request)
            .await
            .unwrap_err();

        assert!(matches!(err, LLMError::ProviderNotAvailable { .. }));
    }

    #[test]
    fn test_builder_registers_configured_providers() {
        let router = LLMRouterBuilder::new()
            .with_openai(OpenAIConfig {
                api_key: "sk-test".to_string(),
                model: OpenAIConfig::DEFAULT_MODEL.to_string(),
                base_url: OpenAIConfig::DEFAULT_BASE_URL.to_string(),
            })
            .with_deepseek(DeepSeekConfig {
                api_key: "sk-test".to_string(),
                model: DeepSeekConfig::DEFAULT_MODEL.to_string(),
                base_url: DeepSeekConfig::DEFAULT_BASE_URL.to_string(),
            })
            .build();

        assert_eq!(
            router.kinds(),
            vec![ProviderKind::DeepSeek, ProviderKind::OpenAI]
        );
        assert_eq!(
            router.provider(ProviderKind::DeepSeek).map(|p| p.name()),
            Some("DeepSeek")
        );
    }
}
