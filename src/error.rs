use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::game::GameError;
use crate::rpc::RpcResponse;

#[derive(Debug)]
pub enum AppError {
    Internal(String),
    BadRequest(String),
    NotFound(String),
    MethodNotFound(String),
    Game(GameError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotFound(_) => StatusCode::BAD_REQUEST,
            AppError::Game(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::Internal(e) => {
                tracing::error!("internal error: {e}");
                "internal server error".to_string()
            }
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::MethodNotFound(method) => format!("rpc: can't find method {method:?}"),
            AppError::Game(e) => format!("error placing piece in game: {e}"),
        }
    }

    /// Renders the error as a JSON-RPC response envelope for request `id`.
    pub fn into_rpc_response(self, id: Value) -> Response {
        let status = self.status();
        (status, Json(RpcResponse::failure(id, self.message()))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_rpc_response(Value::Null)
    }
}

impl From<GameError> for AppError {
    fn from(e: GameError) -> Self {
        AppError::Game(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::BadRequest(format!("invalid params: {e}"))
    }
}
