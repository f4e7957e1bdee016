use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{
    config::{parse_llm_provider_model, LlmConfig},
    error::{JournalError, Result},
    llm::provider::CompletionOptions,
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

/// Providers that run locally and accept requests without a key.
const KEYLESS_PROVIDERS: &[&str] = &["ollama", "lmstudio", "local"];

/// Connection settings derived from an [`LlmConfig`].
#[derive(Debug, Clone)]
struct Endpoint {
    base_url: String,
    api_key: Option<String>,
    /// Model name as the upstream expects it, without our `provider/` prefix.
    model: String,
    timeout: Duration,
    max_retries: u32,
    app_referer: Option<String>,
    app_title: Option<String>,
    keyless: bool,
}

impl Endpoint {
    fn resolve(config: &LlmConfig) -> Self {
        let (provider, model) = parse_llm_provider_model(&config.model);
        let provider = provider.to_lowercase();

        let model = if provider == "local" {
            config.model.clone()
        } else {
            model.to_string()
        };

        Self {
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| default_base_url(&provider).to_string()),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model,
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: config.max_retries,
            app_referer: config.app_referer.clone(),
            app_title: config.app_title.clone(),
            keyless: KEYLESS_PROVIDERS.contains(&provider.as_str()),
        }
    }

    /// `HTTP-Referer` and `X-Title`, which OpenRouter uses for app attribution.
    fn attribution_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (name, value) in [
            ("http-referer", self.app_referer.as_deref()),
            ("x-title", self.app_title.as_deref()),
        ] {
            let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };
            let value = HeaderValue::from_str(value).map_err(|e| {
                JournalError::Llm(format!("Invalid value for {name} header: {e}"))
            })?;
            headers.insert(HeaderName::from_static(name), value);
        }

        Ok(headers)
    }
}

fn default_base_url(provider: &str) -> &'static str {
    match provider {
        "openrouter" => OPENROUTER_BASE_URL,
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => LMSTUDIO_BASE_URL,
        _ => OPENAI_BASE_URL,
    }
}

/// Base URL a model string resolves to, honoring an explicit `base_url`.
pub(crate) fn resolved_base_url(config: &LlmConfig) -> String {
    Endpoint::resolve(config).base_url
}

/// How a failed completion should be handled.
#[derive(Debug, PartialEq, Eq)]
enum Failure {
    RateLimited,
    Unauthorized,
    Transient,
    Permanent,
}

fn api_error_fields(api_error: &ApiError) -> (String, String, String) {
    (
        api_error.message.to_lowercase(),
        api_error.r#type.clone().unwrap_or_default().to_lowercase(),
        api_error.code.clone().unwrap_or_default().to_lowercase(),
    )
}

fn classify(error: &OpenAIError) -> Failure {
    match error {
        OpenAIError::Reqwest(e) => match e.status() {
            Some(reqwest::StatusCode::TOO_MANY_REQUESTS) => Failure::RateLimited,
            Some(reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN) => {
                Failure::Unauthorized
            }
            Some(status) if !status.is_server_error() => Failure::Permanent,
            // Timeouts and connection errors carry no status.
            _ => Failure::Transient,
        },
        OpenAIError::ApiError(api_error) => {
            let (message, kind, code) = api_error_fields(api_error);
            if message.contains("rate limit")
                || message.contains("too many requests")
                || kind.contains("rate_limit")
                || code.contains("rate_limit")
                || kind == "insufficient_quota"
                || code == "insufficient_quota"
            {
                Failure::RateLimited
            } else if message.contains("unauthorized")
                || message.contains("invalid api key")
                || message.contains("authentication")
                || kind.contains("authentication")
                || code.contains("invalid_api_key")
            {
                Failure::Unauthorized
            } else if api_error.r#type.is_none() && api_error.code.is_none() {
                // async-openai reports 5xx bodies as a bare message.
                Failure::Transient
            } else {
                Failure::Permanent
            }
        }
        _ => Failure::Permanent,
    }
}

fn into_journal_error(error: OpenAIError) -> JournalError {
    match error {
        OpenAIError::Reqwest(e) => JournalError::Llm(format!("LLM request failed: {e}")),
        OpenAIError::ApiError(e) => JournalError::Llm(format!("LLM API error: {e}")),
        OpenAIError::JSONDeserialize(e) => {
            JournalError::Llm(format!("Failed to parse LLM response: {e}"))
        }
        OpenAIError::InvalidArgument(message) => JournalError::Validation(message),
        other => JournalError::Llm(other.to_string()),
    }
}

/// Thin chat-completion client over `async-openai`.
#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
    endpoint: Endpoint,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let endpoint = Endpoint::resolve(config);

        if !endpoint.keyless && endpoint.api_key.is_none() {
            return Err(JournalError::Llm(
                "API key required for this provider".to_string(),
            ));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(endpoint.base_url.clone())
            .with_api_key(endpoint.api_key.clone().unwrap_or_default());

        let http_client = reqwest::Client::builder()
            .timeout(endpoint.timeout)
            .default_headers(endpoint.attribution_headers()?)
            .build()
            .map_err(|e| JournalError::Llm(format!("Failed to create LLM HTTP client: {e}")))?;

        // Retries happen in `complete` only, so async-openai's own backoff gives up at once.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self { client, endpoint })
    }

    pub fn model(&self) -> &str {
        &self.endpoint.model
    }

    /// Send `prompt` as a single user message and return the first choice's text.
    pub async fn complete(
        &self,
        prompt: &str,
        options: Option<&CompletionOptions>,
    ) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(JournalError::Validation("Prompt cannot be empty".to_string()));
        }

        let request = self.build_request(prompt, options)?;
        let mut attempt = 0;

        loop {
            let error = match self.client.chat().create(request.clone()).await {
                Ok(response) => return Self::first_choice(response),
                Err(error) => error,
            };

            match classify(&error) {
                Failure::RateLimited => {
                    tracing::warn!(error = %error, "LLM rate limited");
                    return Err(JournalError::LlmRateLimit { retry_after: None });
                }
                Failure::Unauthorized => {
                    return Err(JournalError::Llm(format!(
                        "LLM authentication failed: {error}"
                    )));
                }
                Failure::Transient if attempt < self.endpoint.max_retries => {
                    attempt += 1;
                    let delay = Duration::from_millis(100 * 2_u64.pow(attempt - 1));
                    tracing::debug!(attempt, error = %error, "Retrying LLM request");
                    tokio::time::sleep(delay).await;
                }
                Failure::Transient | Failure::Permanent => {
                    return Err(into_journal_error(error));
                }
            }
        }
    }

    fn build_request(
        &self,
        prompt: &str,
        options: Option<&CompletionOptions>,
    ) -> Result<CreateChatCompletionRequest> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| JournalError::Validation(format!("Invalid user prompt: {e}")))?;

        let mut request = CreateChatCompletionRequestArgs::default();
        request
            .model(self.endpoint.model.clone())
            .messages(vec![message.into()]);

        if let Some(options) = options {
            if let Some(temperature) = options.temperature {
                request.temperature(temperature);
            }
            if let Some(max_tokens) = options.max_tokens {
                request.max_tokens(max_tokens);
            }
        }

        request
            .build()
            .map_err(|e| JournalError::Validation(format!("Invalid LLM completion request: {e}")))
    }

    fn first_choice(response: CreateChatCompletionResponse) -> Result<String> {
        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| JournalError::Llm("LLM response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(JournalError::Llm(
                "LLM response contained empty content".to_string(),
            ));
        }

        Ok(content)
    }
}
