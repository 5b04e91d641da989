//! Azure OpenAI Provider
//!
//! LLM provider for Azure-hosted OpenAI deployments. The model name is
//! the deployment name; the resource endpoint comes from configuration
//! or the AZURE_API_BASE environment variable.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{LlmProvider, ProviderConfig};
use crate::types::{ErrorClassifier, Result, ScribeError};

const API_VERSION: &str = "2024-02-15-preview";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_ROLE: &str = "You are a technical documentation specialist. Respond with the revised markdown document only, no commentary.";

/// Azure OpenAI Provider with secure API key handling
pub struct AzureProvider {
    api_key: SecretString,
    api_base: String,
    /// Deployment name on the Azure resource
    model: String,
    temperature: f32,
    max_tokens: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for AzureProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl AzureProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key_str = config
            .api_key
            .or_else(|| std::env::var("AZURE_API_KEY").ok())
            .ok_or_else(|| {
                ScribeError::Config(
                    "Azure API key not found. Set AZURE_API_KEY env var or provide in config"
                        .to_string(),
                )
            })?;

        let api_base = config
            .api_base
            .or_else(|| std::env::var("AZURE_API_BASE").ok())
            .ok_or_else(|| {
                ScribeError::Config(
                    "Azure endpoint not found. Set AZURE_API_BASE env var or provide in config"
                        .to_string(),
                )
            })?;

        let model = config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScribeError::LlmApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key_str),
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.api_base, self.model, API_VERSION
        )
    }
}

#[async_trait]
impl LlmProvider for AzureProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        info!(
            "Generating with Azure OpenAI (deployment: {}, temperature: {})",
            self.model, self.temperature
        );

        let request = ChatCompletionRequest {
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_ROLE.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
        };

        debug!("Sending request to Azure OpenAI API");

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", self.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ScribeError::LlmApi(format!("Azure request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(status, &body, "azure").into());
        }

        let response_body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ScribeError::LlmApi(format!("Failed to parse Azure response: {}", e)))?;

        let content = response_body
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| ScribeError::LlmApi("No content in Azure response".to_string()))?;

        Ok(content.clone())
    }

    fn name(&self) -> &str {
        "azure"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        // Azure has no cheap unauthenticated probe; reuse the deployment
        // endpoint with an empty-model list call on the resource root.
        let url = format!("{}/openai/models?api-version={}", self.api_base, API_VERSION);

        let response = self
            .client
            .get(&url)
            .header("api-key", self.api_key.expose_secret())
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!("Azure OpenAI API is available");
                Ok(true)
            }
            Ok(resp) => {
                warn!("Azure OpenAI API check failed: {}", resp.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Azure OpenAI API check failed: {}", e);
                Ok(false)
            }
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_url() {
        let provider = AzureProvider::new(ProviderConfig {
            api_key: Some("key".to_string()),
            api_base: Some("https://myres.openai.azure.com/".to_string()),
            model: Some("gpt-4o-docs".to_string()),
            ..Default::default()
        })
        .expect("provider with explicit config");

        assert_eq!(
            provider.completions_url(),
            format!(
                "https://myres.openai.azure.com/openai/deployments/gpt-4o-docs/chat/completions?api-version={}",
                API_VERSION
            )
        );
    }

    #[test]
    fn test_missing_endpoint_is_config_error() {
        // No api_base and (in the test environment) no AZURE_API_BASE
        if std::env::var("AZURE_API_BASE").is_ok() {
            return;
        }
        let result = AzureProvider::new(ProviderConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(ScribeError::Config(_))));
    }
}
