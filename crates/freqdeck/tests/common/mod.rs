//! Common test utilities for the freqdeck client tests.

use freqdeck::FetchClient;
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
        .dictionary_url(format!("{}/api/v2/entries/en", server.uri()))
        .build()
        .unwrap()
}

/// Create a chat-completion body whose first choice carries `content`.
#[allow(dead_code)]
pub fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "gen-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}
