//! Tests for image-generation actions.

mod common;

use common::{client_for_mock, setup_mock_server};
use freqdeck::ImageReply;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_generate_escapes_prompt_into_path() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/prompt/What's%20the%20matter%3F"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(b"jpeg-bytes".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let reply = client.images().generate("What's the matter?", 0).await.unwrap();

    match reply {
        ImageReply::Image(download) => {
            assert_eq!(download.status(), 200);
            assert_eq!(download.bytes().await.unwrap(), b"jpeg-bytes".to_vec());
        }
        other => panic!("expected image, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_is_rejection() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("prompt blocked"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let reply = client.images().generate("a prompt", 0).await.unwrap();

    match reply {
        ImageReply::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "prompt blocked");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_routes_wrap_around() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1_u8]))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    assert_eq!(client.route_count(), 1);

    // Any route index maps onto the direct route when no proxies are configured.
    for route in [0, 7] {
        let reply = client.images().generate("a prompt", route).await.unwrap();
        assert!(matches!(reply, ImageReply::Image(_)));
    }
}
