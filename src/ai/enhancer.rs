//! AI Enhancer
//!
//! Revises one generated section's markdown through an external model.
//! Enhancement is strictly non-destructive: any provider failure or
//! empty result returns the original content unchanged. Enhancement
//! failure must never delete or corrupt previously generated content.

use tracing::{error, info, warn};

use super::prompt::enhancement_prompt;
use super::provider::{ProviderConfig, ProviderKind, SharedProvider, create_provider};
use crate::docgen::section::SectionKind;
use crate::types::Result;

/// Parse a `provider/model-name` identifier.
///
/// The split happens on the first `/`. A missing `/` or an unrecognized
/// provider falls back to the default provider with a warning - never a
/// hard failure.
pub fn parse_model_id(model_id: &str) -> (ProviderKind, String) {
    match model_id.split_once('/') {
        Some((provider, model_name)) => match ProviderKind::parse(provider) {
            Some(kind) => (kind, model_name.to_string()),
            None => {
                warn!(
                    "Unsupported provider '{}', falling back to {}",
                    provider,
                    ProviderKind::DEFAULT
                );
                (ProviderKind::DEFAULT, model_name.to_string())
            }
        },
        None => {
            warn!(
                "Invalid model format: '{}'. Expected 'provider/model_name'; using {} with the full string as model name",
                model_id,
                ProviderKind::DEFAULT
            );
            (ProviderKind::DEFAULT, model_id.to_string())
        }
    }
}

/// Enhances documentation content using an AI provider adapter.
pub struct AiEnhancer {
    provider: SharedProvider,
}

impl AiEnhancer {
    /// Build an enhancer from a `provider/model-name` identifier.
    ///
    /// Returns an error only when the resolved provider cannot be
    /// constructed (e.g. missing API key); callers are expected to
    /// degrade to unenhanced generation in that case.
    pub fn new(model_id: &str, config: ProviderConfig) -> Result<Self> {
        let (kind, model_name) = parse_model_id(model_id);
        let config = ProviderConfig {
            model: Some(model_name),
            ..config
        };
        let provider = create_provider(kind, config)?;

        info!(
            "Initialized AI enhancer with {}/{}",
            provider.name(),
            provider.model()
        );
        Ok(Self { provider })
    }

    /// Build an enhancer around an existing provider (used by tests and
    /// the practices layer).
    pub fn with_provider(provider: SharedProvider) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Enhance one section's markdown, returning the original content
    /// unchanged on any failure.
    pub async fn enhance(&self, content: &str, section: SectionKind) -> String {
        info!("Enhancing {} content with AI", section);

        let prompt = enhancement_prompt(section, content);

        match self.provider.complete(&prompt).await {
            Ok(enhanced) if !enhanced.trim().is_empty() => enhanced,
            Ok(_) => {
                warn!(
                    "AI enhancement returned empty output. Using original content for {}.",
                    section
                );
                content.to_string()
            }
            Err(e) => {
                error!("Error during AI enhancement of {}: {}", section, e);
                content.to_string()
            }
        }
    }

    /// Enhance arbitrary markdown with a caller-supplied instruction
    /// (used when customizing best-practice templates).
    pub async fn enhance_with_instruction(&self, instruction: &str, content: &str) -> String {
        let prompt = format!("{}\n\n{}", instruction, content);
        match self.provider.complete(&prompt).await {
            Ok(enhanced) if !enhanced.trim().is_empty() => enhanced,
            Ok(_) => content.to_string(),
            Err(e) => {
                error!("Error during AI customization: {}", e);
                content.to_string()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::LlmProvider;
    use crate::types::ScribeError;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FailingProvider;

    #[async_trait]
    impl LlmProvider for FailingProvider {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(ScribeError::LlmApi("simulated provider outage".to_string()))
        }
        fn name(&self) -> &str {
            "failing"
        }
        fn model(&self) -> &str {
            "none"
        }
        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }
    }

    struct EmptyProvider;

    #[async_trait]
    impl LlmProvider for EmptyProvider {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok("   ".to_string())
        }
        fn name(&self) -> &str {
            "empty"
        }
        fn model(&self) -> &str {
            "none"
        }
        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    struct UppercaseProvider;

    #[async_trait]
    impl LlmProvider for UppercaseProvider {
        async fn complete(&self, prompt: &str) -> Result<String> {
            Ok(prompt.to_uppercase())
        }
        fn name(&self) -> &str {
            "upper"
        }
        fn model(&self) -> &str {
            "none"
        }
        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    #[test]
    fn test_parse_model_id_known_provider() {
        let (kind, model) = parse_model_id("ollama/llama3:latest");
        assert_eq!(kind, ProviderKind::Ollama);
        assert_eq!(model, "llama3:latest");
    }

    #[test]
    fn test_parse_model_id_unknown_provider_falls_back() {
        let (kind, model) = parse_model_id("badprovider/foo");
        assert_eq!(kind, ProviderKind::DEFAULT);
        assert_eq!(model, "foo");
    }

    #[test]
    fn test_parse_model_id_without_slash() {
        let (kind, model) = parse_model_id("gpt-4o");
        assert_eq!(kind, ProviderKind::DEFAULT);
        assert_eq!(model, "gpt-4o");
    }

    #[test]
    fn test_parse_model_id_splits_on_first_slash() {
        let (kind, model) = parse_model_id("openai/org/custom-model");
        assert_eq!(kind, ProviderKind::OpenAi);
        assert_eq!(model, "org/custom-model");
    }

    #[tokio::test]
    async fn test_enhancer_returns_original_on_failure() {
        let enhancer = AiEnhancer::with_provider(Arc::new(FailingProvider));
        let original = "# Overview\n\nOriginal content.";
        let result = enhancer.enhance(original, SectionKind::Overview).await;
        assert_eq!(result, original);
    }

    #[tokio::test]
    async fn test_enhancer_returns_original_on_empty_result() {
        let enhancer = AiEnhancer::with_provider(Arc::new(EmptyProvider));
        let original = "# Install\n\nSteps.";
        let result = enhancer.enhance(original, SectionKind::Installation).await;
        assert_eq!(result, original);
    }

    #[tokio::test]
    async fn test_enhancer_passes_through_revision() {
        let enhancer = AiEnhancer::with_provider(Arc::new(UppercaseProvider));
        let result = enhancer.enhance("body", SectionKind::Api).await;
        assert!(result.contains("BODY"));
    }
}
