use std::time::Duration;

use crate::routes::DEFAULT_RPC_PATH;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_GAMES: usize = 1000;
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn rpc_path_from_env() -> String {
    std::env::var("TICTACTOE_RPC_PATH")
        .ok()
        .filter(|p| p.starts_with('/'))
        .unwrap_or_else(|| DEFAULT_RPC_PATH.to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rpc_path: String,
    pub max_games: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            rpc_path: rpc_path_from_env(),
            max_games: std::env::var("TICTACTOE_MAX_GAMES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_GAMES),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub rpc_path: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            rpc_path: DEFAULT_RPC_PATH.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            server_url: std::env::var("TICTACTOE_SERVER_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string()),
            rpc_path: rpc_path_from_env(),
            poll_interval: std::env::var("TICTACTOE_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            request_timeout: std::env::var("TICTACTOE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// Full URL of the JSON-RPC endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), self.rpc_path)
    }
}
