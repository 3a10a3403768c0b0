/*!
 * Stub Ollama server for tests, built on an axum router.
 *
 * The responder decides the status and body from the request path and body.
 */

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Decides `(status, body)` from `(path, request body)`
pub type Responder = Arc<dyn Fn(&str, &str) -> (u16, String) + Send + Sync>;

#[derive(Clone)]
struct StubState {
    responder: Responder,
    generate_bodies: Arc<Mutex<Vec<String>>>,
}

/// A running stub server
pub struct StubServer {
    /// Base URL, e.g. `http://127.0.0.1:40123`
    pub base_url: String,
    /// Bodies of `/api/generate` requests received, in order
    pub generate_bodies: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Start a server that answers with `responder`
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
    {
        let generate_bodies = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            responder: Arc::new(responder),
            generate_bodies: Arc::clone(&generate_bodies),
        };

        let app = Router::new()
            .route("/api/generate", post(generate))
            .route("/api/version", get(version))
            .fallback(fallback)
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
        let base_url = format!("http://{}", listener.local_addr().expect("stub address"));
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url,
            generate_bodies,
            handle,
        }
    }

    /// Start a server answering every generate request with `answer`
    pub async fn answering(answer: &'static str) -> Self {
        Self::start(move |path, _| match path {
            "/api/version" => (200, r#"{"version":"0.5.7"}"#.to_string()),
            _ => (200, generate_body(answer)),
        })
        .await
    }

    /// Requests received on `/api/generate`
    pub fn generate_requests(&self) -> Vec<serde_json::Value> {
        self.generate_bodies
            .lock()
            .map(|bodies| bodies.iter().filter_map(|b| serde_json::from_str(b).ok()).collect())
            .unwrap_or_default()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A successful non-streaming `/api/generate` body
pub fn generate_body(answer: &str) -> String {
    serde_json::json!({
        "model": "llama3.3:latest",
        "created_at": "2024-05-01T10:00:00Z",
        "response": answer,
        "done": true
    })
    .to_string()
}

/// Bind a listener that accepts connections but never answers
pub async fn start_silent_server() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind silent server");
    let base_url = format!("http://{}", listener.local_addr().expect("silent address"));
    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    (base_url, handle)
}

/// A URL on which nothing is listening
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind free port");
    let addr = listener.local_addr().expect("free port address");
    drop(listener);
    format!("http://{}", addr)
}

async fn generate(State(state): State<StubState>, body: Bytes) -> Response {
    let body = String::from_utf8_lossy(&body).to_string();
    if let Ok(mut bodies) = state.generate_bodies.lock() {
        bodies.push(body.clone());
    }
    respond(&state, "/api/generate", &body)
}

async fn version(State(state): State<StubState>) -> Response {
    respond(&state, "/api/version", "")
}

async fn fallback(State(state): State<StubState>, uri: Uri, body: Bytes) -> Response {
    respond(&state, uri.path(), &String::from_utf8_lossy(&body))
}

fn respond(state: &StubState, path: &str, body: &str) -> Response {
    let (status, payload) = (state.responder)(path, body);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], payload).into_response()
}
