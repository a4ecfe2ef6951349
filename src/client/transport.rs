use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::error::ClientError;
use crate::config::ClientConfig;
use crate::rpc::{
    GameResult, GetGameParams, JoinParams, JoinReply, PlaceParams, RpcRequest, RpcResponse,
    METHOD_GET_GAME, METHOD_JOIN, METHOD_PLACE,
};

/// Request/response channel to the game server. `params` is the single
/// parameter object of the call; the returned value is the `result` member.
pub trait RpcTransport: Send + Sync + 'static {
    fn call(
        &self,
        method: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;
}

/// JSON-RPC 2.0 over HTTP POST.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint(),
            next_id: AtomicU64::new(0),
        })
    }
}

impl RpcTransport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, params);
        tracing::trace!("rpc {method} #{id} -> {}", self.endpoint);

        let resp = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        decode_response(status, &body)
    }
}

/// Interprets an HTTP response body as a JSON-RPC response envelope. An
/// `error` member wins over the HTTP status; a failure status without an
/// envelope is reported as-is.
pub fn decode_response(status: u16, body: &str) -> Result<Value, ClientError> {
    let success = (200..300).contains(&status);
    match serde_json::from_str::<RpcResponse>(body) {
        Ok(RpcResponse {
            error: Some(error), ..
        }) => Err(ClientError::Server(error.message().to_string())),
        Ok(RpcResponse {
            result: Some(result),
            ..
        }) if success => Ok(result),
        _ if !success => Err(ClientError::Http {
            status,
            body: body.to_string(),
        }),
        Ok(_) => Err(ClientError::Protocol(
            "response carries neither result nor error".to_string(),
        )),
        Err(e) => Err(ClientError::Protocol(format!(
            "invalid response envelope: {e}"
        ))),
    }
}

async fn invoke<T, P, R>(transport: &T, method: &str, params: &P) -> Result<R, ClientError>
where
    T: RpcTransport,
    P: Serialize,
    R: DeserializeOwned,
{
    let params = serde_json::to_value(params)
        .map_err(|e| ClientError::Protocol(format!("failed to encode params: {e}")))?;
    let result = transport.call(method, params).await?;
    serde_json::from_value(result)
        .map_err(|e| ClientError::Protocol(format!("unexpected {method} result: {e}")))
}

pub async fn join<T: RpcTransport>(transport: &T) -> Result<JoinReply, ClientError> {
    invoke(transport, METHOD_JOIN, &JoinParams {}).await
}

pub async fn place<T: RpcTransport>(
    transport: &T,
    params: &PlaceParams,
) -> Result<GameResult, ClientError> {
    invoke(transport, METHOD_PLACE, params).await
}

pub async fn get_game<T: RpcTransport>(
    transport: &T,
    game_id: &str,
) -> Result<GameResult, ClientError> {
    let params = GetGameParams {
        game_id: game_id.to_string(),
    };
    invoke(transport, METHOD_GET_GAME, &params).await
}
