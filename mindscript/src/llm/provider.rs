use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{JournalError, Result};
use crate::llm::api::{resolved_base_url, LlmApiClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Chat-completion provider shared by every request.
///
/// The underlying HTTP client is built once; a configuration that cannot
/// produce a client leaves the provider [`LlmBackend::Unavailable`].
#[derive(Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Option<LlmConfig>,
    client: Option<LlmApiClient>,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        if let LlmBackend::Unavailable { reason } = backend {
            return Self::unavailable(&reason);
        }

        match LlmApiClient::new(config) {
            Ok(client) => Self {
                backend,
                config: Some(config.clone()),
                client: Some(client),
            },
            Err(e) => {
                tracing::warn!(model = %config.model, error = %e, "LLM client unavailable");
                Self {
                    backend: LlmBackend::Unavailable {
                        reason: e.to_string(),
                    },
                    config: Some(config.clone()),
                    client: None,
                }
            }
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
            client: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some() && !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_ref()
    }

    pub fn model(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.model.as_str())
    }

    /// Endpoint the provider talks to, if configured.
    pub fn base_url(&self) -> Option<String> {
        self.config.as_ref().map(resolved_base_url)
    }

    pub async fn complete(
        &self,
        prompt: &str,
        options: Option<&CompletionOptions>,
    ) -> Result<String> {
        let client = match (&self.backend, &self.client) {
            (LlmBackend::Unavailable { .. }, _) | (_, None) => {
                return Err(JournalError::LlmUnavailable(self.unavailable_reason()));
            }
            (_, Some(client)) => client,
        };

        client.complete(prompt, options).await
    }

    pub fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "LLM client was not initialized".to_string(),
        }
    }
}

impl std::fmt::Debug for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmProvider")
            .field("backend", &self.backend)
            .field("model", &self.model())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_unavailable() {
        let provider = LlmProvider::new(None);
        assert!(!provider.is_available());
        assert_eq!(provider.unavailable_reason(), "No LLM configuration provided");
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = LlmConfig::new("ollama/llama3");
        let provider = LlmProvider::new(Some(&config));

        assert!(provider.is_available());
        assert_eq!(provider.backend(), &LlmBackend::Ollama);
        assert_eq!(
            provider.base_url().as_deref(),
            Some("http://localhost:11434/v1")
        );
    }

    #[test]
    fn test_openrouter_without_key_is_unavailable() {
        let config = LlmConfig::new("openrouter/google/gemma-3-4b-it:free");
        let provider = LlmProvider::new(Some(&config));

        assert!(!provider.is_available());
        assert!(provider.unavailable_reason().contains("API key required"));
    }

    #[test]
    fn test_unknown_provider_without_base_url() {
        let config = LlmConfig::new("mystery-model");
        let provider = LlmProvider::new(Some(&config));

        assert!(!provider.is_available());
        assert!(provider.unavailable_reason().contains("Unknown provider"));
    }

    #[test]
    fn test_custom_base_url_is_openai_compatible() {
        let mut config = LlmConfig::new("mystery-model");
        config.base_url = Some("http://127.0.0.1:9999/v1".to_string());
        let provider = LlmProvider::new(Some(&config));

        assert!(provider.is_available());
        assert!(matches!(
            provider.backend(),
            LlmBackend::OpenAICompatible { .. }
        ));
    }

    #[tokio::test]
    async fn test_complete_when_unavailable_errors() {
        let provider = LlmProvider::unavailable("offline");
        let err = provider.complete("hello", None).await.unwrap_err();
        assert!(matches!(err, JournalError::LlmUnavailable(reason) if reason == "offline"));
    }
}
