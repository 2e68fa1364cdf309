//! Common test utilities for freqdeck-engine workflow tests.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use freqdeck_engine::{Engine, EngineOptions, FetchClient, Layout, MemoryStorage, RetryPolicy};
use wiremock::MockServer;

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a client whose every endpoint points at the mock server.
pub fn client_for_mock(server: &MockServer) -> FetchClient {
    FetchClient::builder()
        .chat_url(format!("{}/api/v1/chat/completions", server.uri()))
        .api_key("test-token")
        .speech_url(format!("{}/translate_tts", server.uri()))
        .image_url(format!("{}/prompt", server.uri()))
        .image_timeout(Duration::from_millis(200))
        .dictionary_url(format!("{}/api/v2/entries/en", server.uri()))
        .build()
        .unwrap()
}

/// Options without pauses, so tests run at full speed.
pub fn fast_options() -> EngineOptions {
    EngineOptions {
        ipa_throttle: Duration::ZERO,
        image_retry: RetryPolicy::immediate(2),
        ..Default::default()
    }
}

/// Create an Engine using the mock server, in-memory inputs and `output` for files.
pub fn engine_for_mock(server: &MockServer, storage: &Arc<MemoryStorage>, output: &Path) -> Engine {
    Engine::from_client(client_for_mock(server))
        .with_layout(Layout::new(output.join("input"), output))
        .with_storage(storage.clone())
        .with_options(fast_options())
}

/// Create a chat-completion body whose first choice carries `meanings` as JSON.
#[allow(dead_code)]
pub fn chat_reply(meanings: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": format!("```json\n{}\n```", meanings) } }
        ]
    })
}

/// A meanings store file with the given `(word, pos)` entries.
#[allow(dead_code)]
pub fn meanings_json(words: &[(&str, &str)]) -> String {
    let meanings: Vec<serde_json::Value> = words
        .iter()
        .map(|(w, p)| {
            serde_json::json!({
                "w": w,
                "p": p,
                "m": format!("meaning of {}", w),
                "e": format!("An example with {}.", w)
            })
        })
        .collect();
    serde_json::to_string(&meanings).unwrap()
}
