#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower::ServiceExt;

use quill::llm_client::LlmClient;
use quill::signup::repository::InMemoryUserRepository;
use quill::{build_router, AppState};

pub const TEST_API_KEY: &str = "sk-test-key";

// -- Helpers ------------------------------------------------------------------

/// Binds an ephemeral port, serves `router` on it, and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

/// A base URL on which nothing is listening.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn llm_client(base_url: &str) -> LlmClient {
    LlmClient::new(
        Some(TEST_API_KEY.to_string()),
        base_url,
        Duration::from_secs(5),
    )
    .unwrap()
}

/// The Quill router with an in-memory user store and the LLM pointed at `llm_base_url`.
pub fn test_app(llm_base_url: &str) -> (Router, Arc<InMemoryUserRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let state = AppState {
        llm: llm_client(llm_base_url),
        users: users.clone(),
    };
    (build_router(state), users)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _, bytes) = send(app, req).await;
    let value: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, &body.to_string()).await
}

// -- Stub chat-completion provider --------------------------------------------

#[derive(Clone)]
pub enum ProviderReply {
    /// Reply with a `generate_response` tool call carrying these raw arguments.
    ToolCall(String),
    /// Reply with plain assistant text and no tool call.
    Text(String),
    /// Reply with an error status and body.
    Error(StatusCode, Value),
}

#[derive(Clone, Debug)]
pub struct CapturedCall {
    pub authorization: Option<String>,
    pub body: Value,
}

pub struct StubProvider {
    pub base_url: String,
    calls: Arc<Mutex<Vec<CapturedCall>>>,
}

impl StubProvider {
    pub async fn spawn(reply: ProviderReply) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = calls.clone();

        let router = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let recorded = recorded.clone();
                let reply = reply.clone();
                async move {
                    recorded.lock().unwrap().push(CapturedCall {
                        authorization: headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                        body,
                    });
                    provider_response(reply)
                }
            }),
        );

        let base_url = format!("{}/v1", serve(router).await);
        Self { base_url, calls }
    }

    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().unwrap().clone()
    }
}

fn provider_response(reply: ProviderReply) -> (StatusCode, Json<Value>) {
    match reply {
        ProviderReply::ToolCall(arguments) => (
            StatusCode::OK,
            Json(json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "model": "gpt-4o-mini",
                "choices": [{
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {
                                "name": "generate_response",
                                "arguments": arguments
                            }
                        }]
                    },
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49}
            })),
        ),
        ProviderReply::Text(text) => (
            StatusCode::OK,
            Json(json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": text},
                    "finish_reason": "stop"
                }]
            })),
        ),
        ProviderReply::Error(status, body) => (status, Json(body)),
    }
}

// -- Stub sign-up endpoint ----------------------------------------------------

/// A `/api/signup` stand-in that records request bodies and answers with a
/// fixed status and body, optionally holding each reply until released.
pub struct StubSignUp {
    pub base_url: String,
    bodies: Arc<Mutex<Vec<Value>>>,
    release: Option<Arc<Notify>>,
}

impl StubSignUp {
    pub async fn spawn(status: StatusCode, reply: Value) -> Self {
        Self::spawn_inner(status, reply, None).await
    }

    /// Each request waits for `release()` before it is answered.
    pub async fn spawn_gated(status: StatusCode, reply: Value) -> Self {
        Self::spawn_inner(status, reply, Some(Arc::new(Notify::new()))).await
    }

    async fn spawn_inner(status: StatusCode, reply: Value, release: Option<Arc<Notify>>) -> Self {
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let recorded = bodies.clone();
        let gate = release.clone();

        let router = Router::new().route(
            "/api/signup",
            post(move |Json(body): Json<Value>| {
                let recorded = recorded.clone();
                let gate = gate.clone();
                let reply = reply.clone();
                async move {
                    recorded.lock().unwrap().push(body);
                    if let Some(gate) = gate {
                        gate.notified().await;
                    }
                    (status, Json(reply))
                }
            }),
        );

        Self {
            base_url: serve(router).await,
            bodies,
            release,
        }
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn release(&self) {
        if let Some(gate) = &self.release {
            gate.notify_one();
        }
    }
}
