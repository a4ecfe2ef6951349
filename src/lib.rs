pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod random;
pub mod routes;
pub mod rpc;
pub mod server;
pub mod state;
pub mod tictactoe;
