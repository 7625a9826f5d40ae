use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use loop_backend::message::{ChatResponse, WaitlistAck};
use loop_backend::routes::create_router;
use loop_backend::services::concierge::{CompletionClient, EMPTY_REPLY};
use loop_backend::state::AppState;

/// Counts calls so validation tests can assert the provider was never hit.
struct MockLlm {
    reply: Result<&'static str, ()>,
    calls: AtomicUsize,
}

impl MockLlm {
    fn replying(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for MockLlm {
    async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Ok(reply) => Ok(reply.to_string()),
            Err(()) => anyhow::bail!("provider unreachable"),
        }
    }
}

fn app(llm: Arc<MockLlm>) -> Router {
    create_router().with_state(Arc::new(AppState::new(llm)))
}

fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_chat_returns_reply() {
    let llm = MockLlm::replying("Loop plans start at $9.99/month.");
    let app = app(llm.clone());

    let response = app
        .oneshot(post_json("/api/chat", r#"{"message": "pricing?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let chat_resp: ChatResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(chat_resp.reply, "Loop plans start at $9.99/month.");
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn test_chat_rejects_non_string_message() {
    let llm = MockLlm::replying("unused");
    let app = app(llm.clone());

    let response = app
        .oneshot(post_json("/api/chat", r#"{"message": 123}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert_eq!(llm.calls(), 0, "validation failure must not reach the provider");
}

#[tokio::test]
async fn test_chat_rejects_missing_and_blank_message() {
    let llm = MockLlm::replying("unused");

    for body in [r#"{}"#, r#"{"message": "   "}"#, r#"not json"#] {
        let response = app(llm.clone())
            .oneshot(post_json("/api/chat", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }

    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn test_chat_upstream_failure_keeps_reply_renderable() {
    let llm = MockLlm::failing();
    let app = app(llm.clone());

    let response = app
        .oneshot(post_json("/api/chat", r#"{"message": "pricing?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    let reply = body["reply"].as_str().unwrap();
    assert!(!reply.is_empty());
    assert!(reply.contains("nick@loopdsp.com"));
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn test_chat_blank_provider_content_is_substituted() {
    let llm = MockLlm::replying("");
    let app = app(llm);

    let response = app
        .oneshot(post_json("/api/chat", r#"{"message": "pricing?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let chat_resp: ChatResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(chat_resp.reply, EMPTY_REPLY);
}

#[tokio::test]
async fn test_waitlist_accepts_valid_email() {
    let app = app(MockLlm::replying("unused"));

    let response = app
        .oneshot(post_json("/api/waitlist", r#"{"email": "a@b.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let ack: WaitlistAck = serde_json::from_slice(&bytes).unwrap();
    assert!(ack.ok);
}

#[tokio::test]
async fn test_waitlist_rejects_bad_input() {
    for body in [
        r#"{"email": "not-an-email"}"#,
        r#"{"email": 42}"#,
        r#"{}"#,
    ] {
        let response = app(MockLlm::replying("unused"))
            .oneshot(post_json("/api/waitlist", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app(MockLlm::replying("unused"));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
