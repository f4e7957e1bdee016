// Shared helpers for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Once};

use axum::body::Body;
use axum::http::{Request, Response};
use serde_json::json;
use tempfile::NamedTempFile;

use mindscript::api::AppState;
use mindscript::config::{Config, DatabaseConfig, LlmConfig, ServerConfig};
use mindscript::db::{Database, DatabaseBackend, LibSqlBackend};
use mindscript::llm::LlmProvider;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn test_config(database_url: String, llm: Option<LlmConfig>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:5173".to_string()],
            max_body_bytes: 64 * 1024,
        },
        database: DatabaseConfig {
            url: database_url,
            ..Default::default()
        },
        llm,
    }
}

/// App state over a fresh file-backed database. Keep the returned file alive
/// for the duration of the test.
pub async fn test_state(llm: Option<LlmConfig>) -> (AppState, NamedTempFile) {
    test_state_with(llm, false).await
}

pub async fn test_state_with(
    llm: Option<LlmConfig>,
    unique_entries: bool,
) -> (AppState, NamedTempFile) {
    init_test_logger();
    let tmp = NamedTempFile::new().expect("temp db file");
    let mut config = test_config(format!("file:{}", tmp.path().display()), llm);
    config.database.unique_entries = unique_entries;

    let db = Database::new(&config.database)
        .await
        .expect("database should open");
    let backend: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(db));
    let llm = LlmProvider::new(config.llm.as_ref());

    (AppState::new(config, backend, llm), tmp)
}

/// LLM config pointed at a mock server, with a short timeout so that
/// upstream 5xx retries inside the client give up quickly.
pub fn mock_llm_config(base_url: String, max_retries: u32) -> LlmConfig {
    let mut config = LlmConfig::new("openai/gpt-4o-mini");
    config.api_key = Some("test-key".to_string());
    config.base_url = Some(base_url);
    config.timeout_secs = 1;
    config.max_retries = max_retries;
    config
}

pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

pub fn api_error_body(message: &str, error_type: &str, code: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": serde_json::Value::Null,
            "code": code
        }
    })
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

// Re-export commonly used crates for convenience
pub use serial_test::serial;
pub use tempfile;
pub use wiremock;
