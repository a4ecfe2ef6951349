mod health;
pub mod rpc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Default path of the JSON-RPC endpoint.
pub const DEFAULT_RPC_PATH: &str = "/rpc";

/// Build the full application router with the JSON-RPC endpoint mounted at
/// `rpc_path`.
pub fn router(state: AppState, rpc_path: &str) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/version", get(health::version))
        .route(rpc_path, post(rpc::handle))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
