//! Fake node serving the registered RPC endpoints over real HTTP.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use node_smoke_core::registry;
use node_smoke_core::testing::healthy_payload;

pub const CHAIN: &str = "main";

#[derive(Clone)]
struct NodeState {
    routes: Arc<HashMap<String, (StatusCode, String)>>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// A running fake node. Every registered endpoint answers with a healthy
/// payload unless overridden.
pub struct FakeNode {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Replacement response for one endpoint path (without query string).
pub struct Override {
    pub path: String,
    pub status: StatusCode,
    pub body: String,
}

impl Override {
    pub fn json(path: &str, status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            path: path.to_string(),
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(path: &str, status: StatusCode, body: &str) -> Self {
        Self {
            path: path.to_string(),
            status,
            body: body.to_string(),
        }
    }
}

impl FakeNode {
    pub async fn healthy() -> Self {
        Self::start(Vec::new()).await
    }

    pub async fn start(overrides: Vec<Override>) -> Self {
        let mut routes = HashMap::new();
        for check in registry() {
            let path = check.render_path(CHAIN);
            let key = path.split('?').next().unwrap_or_default().to_string();
            routes.insert(key, (StatusCode::OK, healthy_payload(check).to_string()));
        }
        for o in overrides {
            routes.insert(o.path, (o.status, o.body));
        }

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = NodeState {
            routes: Arc::new(routes),
            requests: requests.clone(),
        };
        let app = Router::new().fallback(serve).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake node");
        let addr = listener.local_addr().expect("fake node address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Path and query of every request received, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log").clone()
    }
}

async fn serve(State(state): State<NodeState>, uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| uri.path().to_string());
    state.requests.lock().expect("request log").push(target);

    match state.routes.get(uri.path()) {
        Some((status, body)) => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "unknown endpoint").into_response(),
    }
}

/// Base URL of a port with nothing listening on it.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind spare port");
    let port = listener.local_addr().expect("spare port address").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
