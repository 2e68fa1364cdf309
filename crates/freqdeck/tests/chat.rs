//! Tests for chat-completion actions.

mod common;

use common::{chat_reply, client_for_mock, setup_mock_server};
use freqdeck::{Error, FetchClient, Word};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_meanings_parses_fenced_reply() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(serde_json::json!({
            "model": "deepseek/deepseek-chat-v3-0324:free"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
            "```json\n[{\"w\":\"the\",\"p\":\"det\",\"m\":\"definite article\",\"e\":\"What's the matter?\"},\
             {\"w\":\"run\",\"p\":\"v\",\"m\":\"move fast\",\"e\":\"I run daily.\"}]\n```",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let meanings = client
        .chat()
        .meanings(&[Word::new("the", "det"), Word::new("run", "v")])
        .await
        .unwrap();

    assert_eq!(meanings.len(), 2);
    assert_eq!(meanings[0].id(), "the-det");
    assert_eq!(meanings[0].example, "What's the matter?");
    assert_eq!(meanings[1].id(), "run-v");
    assert_eq!(meanings[1].meaning, "move fast");
}

#[tokio::test]
async fn test_meanings_sends_one_line_per_word() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "messages": [
                { "role": "system" },
                { "role": "user", "content": "the det\nrun v\n" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("[]")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let meanings = client
        .chat()
        .meanings(&[Word::new("the", "det"), Word::new("run", "v")])
        .await
        .unwrap();

    assert!(meanings.is_empty());
}

#[tokio::test]
async fn test_empty_choices_is_error() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let result = client.chat().meanings(&[Word::new("the", "det")]).await;

    assert!(matches!(result, Err(Error::EmptyChoices)));
}

#[tokio::test]
async fn test_error_status_carries_body() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let result = client.chat().meanings(&[Word::new("the", "det")]).await;

    match result {
        Err(Error::Status { status, body }) => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_content_is_json_error() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_reply("Sorry, I cannot help with that.")),
        )
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let result = client.chat().meanings(&[Word::new("the", "det")]).await;

    assert!(matches!(result, Err(Error::Json(_))));
}

#[tokio::test]
async fn test_missing_api_key() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("[]")))
        .expect(0)
        .mount(&server)
        .await;

    let client = FetchClient::builder()
        .chat_url(format!("{}/api/v1/chat/completions", server.uri()))
        .build()
        .unwrap();
    let result = client.chat().meanings(&[Word::new("the", "det")]).await;

    assert!(matches!(result, Err(Error::MissingApiKey)));
}
