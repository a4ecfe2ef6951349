#![allow(dead_code)]

use axum::body::Body;
use http::{Method, Request};
use tictactoe_rpc::routes::{self, DEFAULT_RPC_PATH};
use tictactoe_rpc::state::AppState;

/// In-memory game server. Each instance is isolated, so tests can run in
/// parallel.
pub struct TestServer {
    pub state: AppState,
}

impl TestServer {
    pub fn new() -> Self {
        Self::with_max_games(100)
    }

    pub fn with_max_games(max_games: usize) -> Self {
        Self {
            state: AppState::new(max_games),
        }
    }

    /// Returns an Axum Router wired to this server's state for `oneshot()` calls.
    pub fn router(&self) -> axum::Router {
        routes::router(self.state.clone(), DEFAULT_RPC_PATH)
    }

    /// Binds a TCP listener on port 0, spawns the server, and returns the base URL.
    pub async fn spawn(&self) -> String {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://127.0.0.1:{}", addr.port())
    }

    /// Full URL of the JSON-RPC endpoint of a spawned server.
    pub async fn spawn_endpoint(&self) -> String {
        format!("{}{}", self.spawn().await, DEFAULT_RPC_PATH)
    }
}

// ---------------------------------------------------------------------------
// Request builder helpers
// ---------------------------------------------------------------------------

/// Build a JSON-RPC 2.0 request envelope with a single parameter object.
pub fn rpc_body(method: &str, params: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 0,
        "method": method,
        "params": [params],
    })
}

/// Build a POST request to the JSON-RPC endpoint with a JSON body.
pub fn rpc_request(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(DEFAULT_RPC_PATH)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Parse a response body into a `serde_json::Value`.
pub async fn parse_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
