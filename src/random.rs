use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of a generated game id.
pub const GAME_ID_LEN: usize = 20;
/// Length of a generated player id.
pub const PLAYER_ID_LEN: usize = 10;

/// Random alphanumeric string of length `n`.
pub fn string(n: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(n)
        .map(char::from)
        .collect()
}

pub fn game_id() -> String {
    string(GAME_ID_LEN)
}

pub fn player_id() -> String {
    string(PLAYER_ID_LEN)
}
