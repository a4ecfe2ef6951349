//! Server side of the tic-tac-toe RPC methods: matchmaking and moves against
//! the in-memory game store.

use crate::error::AppError;
use crate::game::Game;
use crate::random;
use crate::rpc::{GameResult, GetGameParams, JoinReply, PlaceParams};
use crate::state::AppState;

fn result_of(game: &Game) -> GameResult {
    GameResult {
        board: game.board(),
        is_over: game.over(),
        winner_id: game.winner().to_string(),
    }
}

/// Adds a player to the latest open game, creating a new game when there is
/// none or the latest one already has two players.
pub async fn join(state: &AppState) -> Result<JoinReply, AppError> {
    let mut lobby = state.lobby.lock().await;

    let open_game = lobby.latest_game_id.clone().filter(|id| {
        state
            .games
            .get(id)
            .map(|game| !game.is_full())
            .unwrap_or(false)
    });

    let game_id = match open_game {
        Some(id) => id,
        None => {
            let game_id = loop {
                let id = random::game_id();
                if !state.games.contains_key(&id) {
                    break id;
                }
            };
            while lobby.order.len() >= state.max_games {
                if let Some(evicted) = lobby.order.pop_front() {
                    state.games.remove(&evicted);
                    tracing::debug!("evicted game {evicted}");
                }
            }
            state.games.insert(game_id.clone(), Game::new());
            lobby.order.push_back(game_id.clone());
            lobby.latest_game_id = Some(game_id.clone());
            tracing::info!("created game {game_id}");
            game_id
        }
    };

    let mut game = state
        .games
        .get_mut(&game_id)
        .ok_or_else(|| AppError::Internal(format!("game {game_id} vanished during join")))?;
    let (player_id, piece) = game.new_player().map_err(|e| {
        AppError::Internal(format!("error adding new player to game: {e}"))
    })?;
    tracing::info!("player {player_id} joined game {game_id} as {}", piece.symbol());

    Ok(JoinReply {
        game_id,
        player_id,
        piece: Some(piece),
        board: game.board(),
        is_over: game.over(),
        winner_id: game.winner().to_string(),
    })
}

pub fn place(state: &AppState, params: &PlaceParams) -> Result<GameResult, AppError> {
    let mut game = state
        .games
        .get_mut(&params.game_id)
        .ok_or_else(|| AppError::NotFound("game does not exist".to_string()))?;
    game.place(&params.player_id, params.position)?;
    tracing::debug!(
        "player {} placed at {:?} in game {}",
        params.player_id,
        params.position,
        params.game_id
    );
    Ok(result_of(&game))
}

pub fn get_game(state: &AppState, params: &GetGameParams) -> Result<GameResult, AppError> {
    let game = state
        .games
        .get(&params.game_id)
        .ok_or_else(|| AppError::NotFound("game does not exist".to_string()))?;
    Ok(result_of(&game))
}
