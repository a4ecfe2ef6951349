use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::game::Game;

/// Matchmaking bookkeeping. Only touched while holding the lobby lock, so
/// at most one player joins at a time.
#[derive(Debug, Default)]
pub struct Lobby {
    /// Game that the next joining player is added to, until it fills up.
    pub latest_game_id: Option<String>,
    /// Game ids in creation order, oldest first, for eviction.
    pub order: VecDeque<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub games: Arc<DashMap<String, Game>>,
    pub lobby: Arc<Mutex<Lobby>>,
    pub max_games: usize,
}

impl AppState {
    pub fn new(max_games: usize) -> Self {
        Self {
            games: Arc::new(DashMap::new()),
            lobby: Arc::new(Mutex::new(Lobby::default())),
            max_games: max_games.max(1),
        }
    }
}
