use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::rpc::{
    GetGameParams, JoinParams, PlaceParams, RpcRequest, RpcResponse, JSONRPC_VERSION,
    METHOD_GET_GAME, METHOD_JOIN, METHOD_PLACE,
};
use crate::state::AppState;
use crate::tictactoe;

/// Single JSON-RPC 2.0 endpoint. Every response, including failures, is a
/// response envelope; failures are sent with a 4xx/5xx status.
pub async fn handle(State(state): State<AppState>, body: Bytes) -> Response {
    let request: RpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return AppError::BadRequest(format!("rpc: invalid request: {e}")).into_response()
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return AppError::BadRequest(format!(
            "rpc: unsupported jsonrpc version {:?}",
            request.jsonrpc
        ))
        .into_rpc_response(request.id);
    }

    match dispatch(&state, &request).await {
        Ok(result) => Json(RpcResponse::success(request.id, result)).into_response(),
        Err(e) => {
            tracing::debug!("{} failed: {}", request.method, e.message());
            e.into_rpc_response(request.id)
        }
    }
}

async fn dispatch(state: &AppState, request: &RpcRequest) -> Result<Value, AppError> {
    let params = request.param_object();
    let result = match request.method.as_str() {
        METHOD_JOIN => {
            let _: JoinParams = serde_json::from_value(params)?;
            to_result(tictactoe::join(state).await?)?
        }
        METHOD_PLACE => {
            let params: PlaceParams = serde_json::from_value(params)?;
            to_result(tictactoe::place(state, &params)?)?
        }
        METHOD_GET_GAME => {
            let params: GetGameParams = serde_json::from_value(params)?;
            to_result(tictactoe::get_game(state, &params)?)?
        }
        other => return Err(AppError::MethodNotFound(other.to_string())),
    };
    Ok(result)
}

fn to_result<T: serde::Serialize>(reply: T) -> Result<Value, AppError> {
    serde_json::to_value(reply).map_err(|e| AppError::Internal(e.to_string()))
}
