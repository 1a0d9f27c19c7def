use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use http_body_util::BodyExt;
use picker_core::session::{ChatMessage, MessageRole};
use picker_interaction::{Upstream, UpstreamError, UpstreamResponse};
use picker_server::{app, config::Config, state::AppState};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Upstream stub that records what it was asked to forward.
struct StubUpstream {
    outcome: Result<UpstreamResponse, UpstreamError>,
    forwarded: Mutex<Vec<Vec<ChatMessage>>>,
}

impl StubUpstream {
    fn answering(status: u16, body: Value) -> Arc<Self> {
        Self::with_outcome(Ok(UpstreamResponse { status, body }))
    }

    fn with_outcome(outcome: Result<UpstreamResponse, UpstreamError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            forwarded: Mutex::new(Vec::new()),
        })
    }

    fn forwarded(&self) -> Vec<Vec<ChatMessage>> {
        self.forwarded.lock().unwrap().clone()
    }
}

#[async_trait]
impl Upstream for StubUpstream {
    async fn forward(&self, messages: &[ChatMessage]) -> Result<UpstreamResponse, UpstreamError> {
        self.forwarded.lock().unwrap().push(messages.to_vec());
        self.outcome.clone()
    }
}

fn config() -> Config {
    Config::from_lookup(|key| (key == "OPENAI_API_KEY").then(|| "sk-test".to_string())).unwrap()
}

fn router(upstream: Arc<StubUpstream>) -> Router {
    app(AppState::with_upstream(config(), upstream))
}

fn post_openai(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/openai")
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

#[tokio::test]
async fn test_forwards_messages_and_relays_body() {
    let upstream = StubUpstream::answering(200, completion("hi!"));
    let request = json!({
        "messages": [
            {"role": "system", "content": "You are a helpful assistant."},
            {"role": "user", "content": "hello"}
        ]
    });

    let response = router(upstream.clone())
        .oneshot(post_openai(request.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, completion("hi!"));

    let forwarded = upstream.forwarded();
    assert_eq!(forwarded.len(), 1);
    assert_eq!(forwarded[0].len(), 2);
    assert_eq!(forwarded[0][0].role, MessageRole::System);
    assert_eq!(forwarded[0][1], ChatMessage::user("hello"));
}

#[tokio::test]
async fn test_upstream_error_status_is_passed_through() {
    let error = json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}});
    let upstream = StubUpstream::answering(401, error.clone());

    let response = router(upstream)
        .oneshot(post_openai(json!({"messages": []}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, error);
}

#[tokio::test]
async fn test_unparsable_body_is_500_with_error() {
    let upstream = StubUpstream::answering(200, completion("unused"));

    let response = router(upstream.clone())
        .oneshot(post_openai("{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    assert!(upstream.forwarded().is_empty());
}

#[tokio::test]
async fn test_body_without_messages_is_500() {
    let response = router(StubUpstream::answering(200, completion("unused")))
        .oneshot(post_openai(json!({"prompt": "hello"}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_upstream_failure_is_500_with_error() {
    let upstream = StubUpstream::with_outcome(Err(UpstreamError::Request("connection reset".into())));

    let response = router(upstream)
        .oneshot(post_openai(json!({"messages": []}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("connection reset"));
}

#[tokio::test]
async fn test_get_openai_is_not_found() {
    let upstream = StubUpstream::answering(200, completion("unused"));
    let request = Request::builder()
        .method(Method::GET)
        .uri("/openai")
        .body(Body::empty())
        .unwrap();

    let response = router(upstream.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(response).await, b"Not found");
    assert!(upstream.forwarded().is_empty());
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .body(Body::empty())
        .unwrap();
    let response = router(StubUpstream::answering(200, completion("unused")))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body_bytes(response).await, b"Not found");
}
