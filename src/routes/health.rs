use axum::Json;

use crate::rpc::{JSONRPC_VERSION, METHOD_GET_GAME, METHOD_JOIN, METHOD_PLACE};

pub async fn health() -> &'static str {
    "ok"
}

/// Build information plus the RPC methods this server answers.
pub async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "git_sha": env!("GIT_SHA"),
        "jsonrpc": JSONRPC_VERSION,
        "methods": [METHOD_JOIN, METHOD_PLACE, METHOD_GET_GAME],
    }))
}
