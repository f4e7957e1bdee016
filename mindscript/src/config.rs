use serde::Deserialize;
use std::env;

/// Model used when an API key is configured but `LLM_MODEL` is not.
pub const DEFAULT_LLM_MODEL: &str = "openrouter/google/gemma-3-4b-it:free";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a comma-separated list, dropping empty items.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. `*` allows any origin.
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
    pub busy_timeout_ms: u64,
    pub journal_mode: String,
    pub synchronous: String,
    /// Declare a unique index on (content, date) for journal entries.
    pub unique_entries: bool,
}

/// LLM configuration for the chat-completion model used by entry analysis
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub temperature: f32,
    /// Sent as `HTTP-Referer` (OpenRouter app attribution).
    pub app_referer: Option<String>,
    /// Sent as `X-Title` (OpenRouter app attribution).
    pub app_title: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "file:mindscript.db".to_string(),
            auth_token: None,
            local_path: None,
            busy_timeout_ms: 5000,
            journal_mode: "WAL".to_string(),
            synchronous: "NORMAL".to_string(),
            unique_entries: false,
        }
    }
}

impl LlmConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            base_url: None,
            timeout_secs: 30,
            max_retries: 0,
            temperature: 0.7,
            app_referer: None,
            app_title: Some("Mindscript AI Journal".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let api_key = env::var("LLM_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let model = env::var("LLM_MODEL")
            .ok()
            .or_else(|| api_key.as_ref().map(|_| DEFAULT_LLM_MODEL.to_string()));

        Self {
            server: ServerConfig {
                host: env::var("MINDSCRIPT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("MINDSCRIPT_PORT", 5000),
                cors_origins: env::var("CORS_ORIGINS")
                    .map(|origins| parse_list(&origins))
                    .unwrap_or_else(|_| vec!["http://localhost:5173".to_string()]),
                max_body_bytes: parse_env_or("MAX_BODY_BYTES", 1024 * 1024),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:mindscript.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
                busy_timeout_ms: parse_env_or("DATABASE_BUSY_TIMEOUT_MS", 5000),
                journal_mode: env::var("DATABASE_JOURNAL_MODE")
                    .unwrap_or_else(|_| "WAL".to_string()),
                synchronous: env::var("DATABASE_SYNCHRONOUS")
                    .unwrap_or_else(|_| "NORMAL".to_string()),
                unique_entries: parse_env_or("DATABASE_UNIQUE_ENTRIES", false),
            },
            llm: model.map(|model| LlmConfig {
                model,
                api_key,
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 0),
                temperature: parse_env_or("LLM_TEMPERATURE", 0.7),
                app_referer: env::var("LLM_APP_REFERER").ok(),
                app_title: Some(
                    env::var("LLM_APP_TITLE")
                        .unwrap_or_else(|_| "Mindscript AI Journal".to_string()),
                ),
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
