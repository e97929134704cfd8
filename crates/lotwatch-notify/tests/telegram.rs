//! Integration tests for `TelegramNotifier` using wiremock HTTP mocks.

use lotwatch_core::Notifier;
use lotwatch_notify::{AlertChannel, NotifyError, TelegramNotifier};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:TEST-TOKEN";

fn test_notifier(base_url: &str) -> TelegramNotifier {
    TelegramNotifier::with_base_url(TOKEN, "-1001", 5, base_url)
        .expect("notifier construction should not fail")
}

#[tokio::test]
async fn send_posts_chat_id_and_text_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_json(serde_json::json!({
            "chat_id": "-1001",
            "text": "🔴 HUGE LOT 🔴\nScore: 14",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let notifier = test_notifier(&server.uri());
    notifier
        .send("🔴 HUGE LOT 🔴\nScore: 14")
        .await
        .expect("send should succeed");
}

#[tokio::test]
async fn non_success_status_is_unexpected_status_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        ))
        .mount(&server)
        .await;

    let notifier = test_notifier(&server.uri());
    let err = notifier.send("hello").await.expect_err("400 should fail");

    match err {
        NotifyError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("chat not found"), "body was {body}");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_error_does_not_leak_token() {
    let notifier = TelegramNotifier::with_base_url(TOKEN, "-1001", 2, "http://127.0.0.1:9")
        .expect("notifier construction should not fail");

    let err = notifier.send("hello").await.expect_err("connect should fail");

    assert!(matches!(err, NotifyError::Http(_)), "got {err:?}");
    assert!(!err.to_string().contains("TEST-TOKEN"), "leaked: {err}");
}

#[tokio::test]
async fn telegram_channel_delivers_through_notifier() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let channel = AlertChannel::Telegram(test_notifier(&server.uri()));
    channel.send("first").await.expect("first send");
    channel.send("second").await.expect("second send");
}
