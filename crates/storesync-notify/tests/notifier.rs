//! Integration tests for `TelegramNotifier` using wiremock HTTP mocks.

use storesync_core::TelegramConfig;
use storesync_notify::{NotifyError, TelegramNotifier};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> TelegramConfig {
    TelegramConfig {
        token: "123:abc".to_owned(),
        chat_id: -1_001_234,
    }
}

#[tokio::test]
async fn send_posts_chat_id_and_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(serde_json::json!({
            "chat_id": -1_001_234,
            "text": "store sync failed"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::with_base_url(&test_config(), &server.uri())
        .expect("notifier construction should not fail");
    notifier
        .send("store sync failed")
        .await
        .expect("send should succeed");
}

#[tokio::test]
async fn non_2xx_response_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::with_base_url(&test_config(), &server.uri())
        .expect("notifier construction should not fail");
    let err = notifier.send("msg").await.unwrap_err();
    match err {
        NotifyError::UnexpectedStatus { status } => {
            assert!(status.contains("403"), "got: {status}");
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}
