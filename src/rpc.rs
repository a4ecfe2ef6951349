//! JSON-RPC 2.0 envelopes and the tic-tac-toe method payloads shared by the
//! server and the client.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::game::{Board, Piece};

pub const JSONRPC_VERSION: &str = "2.0";

pub const METHOD_JOIN: &str = "tictactoe.Join";
pub const METHOD_PLACE: &str = "tictactoe.Place";
pub const METHOD_GET_GAME: &str = "tictactoe.GetGame";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Wraps a single parameter object the way the endpoint expects it:
    /// `params: [object]`.
    pub fn new(id: u64, method: &str, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Value::from(id),
            method: method.to_string(),
            params: vec![params],
        }
    }

    /// The parameter object, or `{}` when `params` is empty.
    pub fn param_object(&self) -> Value {
        self.params
            .first()
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()))
    }
}

/// Error payload of a response. Accepts both a bare message string and the
/// `{code, message}` object form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcErrorPayload {
    Message(String),
    Object {
        #[serde(default)]
        code: Option<i64>,
        message: String,
    },
}

impl RpcErrorPayload {
    pub fn message(&self) -> &str {
        match self {
            RpcErrorPayload::Message(msg) => msg,
            RpcErrorPayload::Object { message, .. } => message,
        }
    }
}

impl fmt::Display for RpcErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorPayload>,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id,
            result: None,
            error: Some(RpcErrorPayload::Message(message.into())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JoinParams {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinReply {
    #[serde(rename = "gameID")]
    pub game_id: String,
    #[serde(rename = "playerID")]
    pub player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece: Option<Piece>,
    pub board: Board,
    #[serde(rename = "isOver", default)]
    pub is_over: bool,
    #[serde(rename = "winnerID", default, deserialize_with = "null_as_empty")]
    pub winner_id: String,
}

impl JoinReply {
    pub fn result(&self) -> GameResult {
        GameResult {
            board: self.board,
            is_over: self.is_over,
            winner_id: self.winner_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceParams {
    #[serde(rename = "gameID")]
    pub game_id: String,
    #[serde(rename = "playerID")]
    pub player_id: String,
    pub position: [i64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetGameParams {
    #[serde(rename = "gameID")]
    pub game_id: String,
}

/// Board snapshot plus game-over state. An empty `winner_id` on a finished
/// game means a draw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub board: Board,
    #[serde(rename = "isOver", default)]
    pub is_over: bool,
    #[serde(rename = "winnerID", default, deserialize_with = "null_as_empty")]
    pub winner_id: String,
}

/// `winnerID` may be missing, empty or `null`; all three mean "no winner".
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
