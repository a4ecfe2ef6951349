//! Polling client for a remote tic-tac-toe game.
//!
//! A [`GamePollingClient`] owns one session at a time. `join` stores the
//! session and starts a single refresh timer; every response is treated as
//! a snapshot that replaces the local view. The timer stops for good once a
//! result reports the game over, or the first time a refresh fails.

pub mod error;
pub mod transport;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::{ClientConfig, DEFAULT_POLL_INTERVAL};
use crate::game::{Board, Piece};
use crate::rpc::{GameResult, PlaceParams};

pub use error::{ClientError, ErrorKind};
pub use transport::{HttpTransport, RpcTransport};

/// Identifiers correlating the local player to a remote game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub game_id: String,
    pub player_id: String,
    pub piece: Option<Piece>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Joined,
    GameOver,
}

/// Finished game from the local player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// An empty winner is a draw; otherwise the game is won when the winner
    /// is the local player and lost for anybody else.
    pub fn classify(winner_id: &str, local_player_id: &str) -> Outcome {
        if winner_id.is_empty() {
            Outcome::Draw
        } else if winner_id == local_player_id {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::Win => "You won tic-tac-toe!",
            Outcome::Loss => "You lost tic-tac-toe!",
            Outcome::Draw => "Tic-tac-toe is a draw!",
        }
    }
}

/// What a UI needs to draw the game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub phase: Phase,
    pub session: Option<Session>,
    pub board: Board,
    pub outcome: Option<Outcome>,
    pub polling: bool,
    pub poll_error: Option<String>,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            session: None,
            board: Board::default(),
            outcome: None,
            polling: false,
            poll_error: None,
        }
    }
}

struct Inner {
    phase: Phase,
    session: Option<Session>,
    poll: Option<JoinHandle<()>>,
    /// Identifies the poll task currently in `poll`.
    poll_epoch: u64,
    /// Bumped on every join; responses tagged with an older generation
    /// belong to a previous session and are dropped.
    generation: u64,
}

struct Shared<T> {
    transport: T,
    poll_interval: Duration,
    inner: Mutex<Inner>,
    view: watch::Sender<GameView>,
}

pub struct GamePollingClient<T: RpcTransport = HttpTransport> {
    shared: Arc<Shared<T>>,
}

impl GamePollingClient<HttpTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_poll_interval(transport, config.poll_interval))
    }
}

impl<T: RpcTransport> GamePollingClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_poll_interval(transport, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(transport: T, poll_interval: Duration) -> Self {
        let (view, _) = watch::channel(GameView::default());
        Self {
            shared: Arc::new(Shared {
                transport,
                poll_interval,
                inner: Mutex::new(Inner {
                    phase: Phase::Idle,
                    session: None,
                    poll: None,
                    poll_epoch: 0,
                    generation: 0,
                }),
                view,
            }),
        }
    }

    /// Joins a new game. Replaces any previous session and starts the
    /// refresh timer unless one is already running.
    pub async fn join(&self) -> Result<Session, ClientError> {
        let reply = transport::join(&self.shared.transport).await?;
        let session = Session {
            game_id: reply.game_id.clone(),
            player_id: reply.player_id.clone(),
            piece: reply.piece,
        };
        tracing::info!(
            "joined game {} as player {}",
            session.game_id,
            session.player_id
        );

        let mut inner = self.shared.lock();
        inner.generation += 1;
        inner.phase = Phase::Joined;
        inner.session = Some(session.clone());
        self.shared.view.send_modify(|view| {
            view.phase = Phase::Joined;
            view.session = Some(session.clone());
            view.outcome = None;
            view.poll_error = None;
        });

        let generation = inner.generation;
        self.shared
            .apply_locked(&mut inner, generation, &reply.result());

        if inner.phase == Phase::Joined && inner.poll.is_none() {
            inner.poll_epoch += 1;
            let shared = Arc::clone(&self.shared);
            inner.poll = Some(tokio::spawn(poll_loop(shared, inner.poll_epoch)));
            self.shared.view.send_modify(|view| view.polling = true);
            tracing::debug!("polling every {:?}", self.shared.poll_interval);
        }
        Ok(session)
    }

    /// Places the local player's piece. Move legality is decided by the
    /// server; rejected moves come back as [`ClientError::Server`].
    pub async fn place(&self, row: usize, col: usize) -> Result<GameResult, ClientError> {
        let (session, generation) = {
            let inner = self.shared.lock();
            match (inner.phase, &inner.session) {
                (Phase::Joined, Some(session)) => (session.clone(), inner.generation),
                (Phase::GameOver, _) => return Err(ClientError::GameOver),
                _ => return Err(ClientError::NotJoined),
            }
        };

        let params = PlaceParams {
            game_id: session.game_id,
            player_id: session.player_id,
            position: [board_index(row), board_index(col)],
        };
        let result = transport::place(&self.shared.transport, &params).await?;
        self.shared.apply(generation, &result);
        Ok(result)
    }

    /// Fetches the current game state. This is what the timer runs; a
    /// failure stops the timer.
    pub async fn refresh(&self) -> Result<GameResult, ClientError> {
        self.shared.refresh().await
    }

    /// Stops polling and classifies the outcome when `result` reports the
    /// game over. Returns `None` for a game still in progress.
    pub fn check_winner(&self, result: &GameResult) -> Option<Outcome> {
        let mut inner = self.shared.lock();
        self.shared.check_winner_locked(&mut inner, result)
    }

    /// Cancels the refresh timer, if any. In-flight refreshes are dropped.
    pub fn stop_polling(&self) -> bool {
        let mut inner = self.shared.lock();
        self.shared.stop_locked(&mut inner)
    }

    pub fn is_polling(&self) -> bool {
        self.shared.lock().poll.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.shared.lock().phase
    }

    pub fn session(&self) -> Option<Session> {
        self.shared.lock().session.clone()
    }

    pub fn view(&self) -> GameView {
        self.shared.view.borrow().clone()
    }

    /// Receives a new [`GameView`] every time the board, outcome or polling
    /// state changes.
    pub fn subscribe(&self) -> watch::Receiver<GameView> {
        self.shared.view.subscribe()
    }
}

impl<T: RpcTransport> Drop for GamePollingClient<T> {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        if let Some(handle) = inner.poll.take() {
            handle.abort();
        }
    }
}

impl<T: RpcTransport> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn refresh(&self) -> Result<GameResult, ClientError> {
        let (game_id, generation) = {
            let mut inner = self.lock();
            let game_id = match inner.phase {
                Phase::Joined => inner.session.as_ref().map(|s| s.game_id.clone()),
                _ => None,
            };
            match game_id {
                Some(game_id) => (game_id, inner.generation),
                None => {
                    let err = if inner.phase == Phase::GameOver {
                        ClientError::GameOver
                    } else {
                        ClientError::NotJoined
                    };
                    self.stop_locked(&mut inner);
                    return Err(err);
                }
            }
        };

        match transport::get_game(&self.transport, &game_id).await {
            Ok(result) => {
                self.apply(generation, &result);
                Ok(result)
            }
            Err(e) => {
                let mut inner = self.lock();
                if inner.generation == generation {
                    tracing::warn!("refresh of game {game_id} failed, polling stopped: {e}");
                    self.stop_locked(&mut inner);
                    let message = e.to_string();
                    self.view
                        .send_modify(|view| view.poll_error = Some(message));
                }
                Err(e)
            }
        }
    }

    /// True while the poll task tagged `epoch` is the registered one.
    fn is_current_poll(&self, epoch: u64) -> bool {
        let inner = self.lock();
        inner.poll.is_some() && inner.poll_epoch == epoch
    }

    fn apply(&self, generation: u64, result: &GameResult) -> Option<Outcome> {
        let mut inner = self.lock();
        self.apply_locked(&mut inner, generation, result)
    }

    /// Overwrites the view with `result` unless it belongs to an earlier
    /// session or arrives after the game already ended.
    fn apply_locked(
        &self,
        inner: &mut Inner,
        generation: u64,
        result: &GameResult,
    ) -> Option<Outcome> {
        if inner.generation != generation || inner.phase != Phase::Joined {
            tracing::debug!("ignoring stale game result");
            return None;
        }
        self.view.send_modify(|view| view.board = result.board);
        self.check_winner_locked(inner, result)
    }

    fn check_winner_locked(&self, inner: &mut Inner, result: &GameResult) -> Option<Outcome> {
        if !result.is_over {
            return None;
        }
        let local = inner
            .session
            .as_ref()
            .map(|s| s.player_id.as_str())
            .unwrap_or("");
        let outcome = Outcome::classify(&result.winner_id, local);
        inner.phase = Phase::GameOver;
        self.stop_locked(inner);
        tracing::info!("game over: {outcome:?}");
        self.view.send_modify(|view| {
            view.phase = Phase::GameOver;
            view.outcome = Some(outcome);
        });
        Some(outcome)
    }

    fn stop_locked(&self, inner: &mut Inner) -> bool {
        match inner.poll.take() {
            Some(handle) => {
                handle.abort();
                self.view.send_modify(|view| view.polling = false);
                tracing::debug!("polling stopped");
                true
            }
            None => false,
        }
    }
}

/// Out-of-range values stay out of range so the server rejects the move.
fn board_index(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

async fn poll_loop<T: RpcTransport>(shared: Arc<Shared<T>>, epoch: u64) {
    let period = shared.poll_interval;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        // A self-abort lands only at the next yield; a late tick never yields.
        if !shared.is_current_poll(epoch) {
            break;
        }
        if let Err(e) = shared.refresh().await {
            tracing::debug!("refresh error: {e}");
            if !shared.is_current_poll(epoch) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;
    use crate::rpc::{METHOD_GET_GAME, METHOD_JOIN, METHOD_PLACE};
    use serde_json::{json, Value};
    use std::future::Future;

    const INTERVAL: Duration = Duration::from_millis(3000);

    #[derive(Default)]
    struct FakeGame {
        board: Board,
        over: bool,
        winner: String,
        fail_get_game: bool,
        fail_join: bool,
        get_game_delay: Duration,
        place_delay: Duration,
        joins: usize,
        calls: Vec<String>,
    }

    /// In-memory stand-in for the server: one game, local player `p1`.
    #[derive(Clone, Default)]
    struct FakeTransport {
        game: Arc<Mutex<FakeGame>>,
    }

    impl FakeTransport {
        fn with<R>(&self, f: impl FnOnce(&mut FakeGame) -> R) -> R {
            f(&mut self.game.lock().unwrap())
        }

        fn count(&self, method: &str) -> usize {
            self.with(|g| g.calls.iter().filter(|m| *m == method).count())
        }

        fn result(game: &FakeGame) -> Value {
            json!({ "board": game.board, "isOver": game.over, "winnerID": game.winner })
        }
    }

    impl RpcTransport for FakeTransport {
        fn call(
            &self,
            method: &str,
            params: Value,
        ) -> impl Future<Output = Result<Value, ClientError>> + Send {
            let delay = self.with(|game| match method {
                METHOD_GET_GAME => game.get_game_delay,
                METHOD_PLACE => game.place_delay,
                _ => Duration::ZERO,
            });
            let outcome = self.with(|game| {
                game.calls.push(method.to_string());
                match method {
                    METHOD_JOIN if game.fail_join => {
                        Err(ClientError::Server("join refused".to_string()))
                    }
                    METHOD_JOIN => {
                        game.joins += 1;
                        let mut result = Self::result(game);
                        result["gameID"] = json!(format!("g{}", game.joins));
                        result["playerID"] = json!("p1");
                        Ok(result)
                    }
                    METHOD_PLACE => {
                        let row = params["position"][0].as_u64().unwrap() as usize;
                        let col = params["position"][1].as_u64().unwrap() as usize;
                        if game.board.0[row][col] != Cell::Empty {
                            return Err(ClientError::Server(
                                "error placing piece in game: position is already occupied"
                                    .to_string(),
                            ));
                        }
                        game.board.0[row][col] = Cell::Taken(Piece::X);
                        Ok(Self::result(game))
                    }
                    METHOD_GET_GAME if game.fail_get_game => {
                        Err(ClientError::Server("game does not exist".to_string()))
                    }
                    METHOD_GET_GAME => Ok(Self::result(game)),
                    other => Err(ClientError::Server(format!("unknown method {other}"))),
                }
            });
            async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                outcome
            }
        }
    }

    fn client() -> (GamePollingClient<FakeTransport>, FakeTransport) {
        let transport = FakeTransport::default();
        let client = GamePollingClient::with_poll_interval(transport.clone(), INTERVAL);
        (client, transport)
    }

    async fn wait(intervals: u32) {
        tokio::time::sleep(INTERVAL * intervals + Duration::from_millis(10)).await;
    }

    #[test]
    fn test_classify() {
        assert_eq!(Outcome::classify("p1", "p1"), Outcome::Win);
        assert_eq!(Outcome::classify("", "p1"), Outcome::Draw);
        assert_eq!(Outcome::classify("p2", "p1"), Outcome::Loss);
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_starts_one_timer() {
        let (client, transport) = client();
        assert!(!client.is_polling());
        assert_eq!(client.phase(), Phase::Idle);

        let session = client.join().await.unwrap();
        assert_eq!(session.game_id, "g1");
        assert_eq!(session.player_id, "p1");
        assert!(client.is_polling());
        assert_eq!(client.phase(), Phase::Joined);

        // Nothing fires before the first full interval.
        tokio::time::sleep(INTERVAL - Duration::from_millis(10)).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 0);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 1);

        wait(2).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_join_does_not_start_second_timer() {
        let (client, transport) = client();
        client.join().await.unwrap();
        let second = client.join().await.unwrap();
        assert_eq!(second.game_id, "g2");
        assert!(client.is_polling());

        wait(4).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 4);
        assert_eq!(client.session().unwrap().game_id, "g2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_stops_polling() {
        let (client, transport) = client();
        client.join().await.unwrap();
        wait(2).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 2);

        transport.with(|g| {
            g.over = true;
            g.winner = "p1".to_string();
        });
        wait(1).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 3);
        assert!(!client.is_polling());
        assert_eq!(client.phase(), Phase::GameOver);
        assert_eq!(client.view().outcome, Some(Outcome::Win));

        wait(5).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_failure_stops_polling() {
        let (client, transport) = client();
        client.join().await.unwrap();
        wait(4).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 4);

        transport.with(|g| g.fail_get_game = true);
        wait(1).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 5);
        assert!(!client.is_polling());

        let view = client.view();
        assert!(!view.polling);
        assert_eq!(view.poll_error.as_deref(), Some("Error: game does not exist"));

        transport.with(|g| g.fail_get_game = false);
        wait(5).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_failing_refresh_is_not_retried() {
        let (client, transport) = client();
        client.join().await.unwrap();
        transport.with(|g| {
            g.fail_get_game = true;
            g.get_game_delay = Duration::from_millis(4000);
        });

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 1);
        assert!(!client.is_polling());
        assert!(client.view().poll_error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_refresh_keeps_single_cadence() {
        let (client, transport) = client();
        client.join().await.unwrap();
        transport.with(|g| g.get_game_delay = Duration::from_millis(4000));

        // Ticks at 3s, then back to back at 7s and 11s once each slow call ends.
        tokio::time::sleep(Duration::from_millis(11_010)).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 3);
        assert!(client.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_after_poll_failure_restarts_timer() {
        let (client, transport) = client();
        client.join().await.unwrap();
        transport.with(|g| g.fail_get_game = true);
        wait(1).await;
        assert!(!client.is_polling());

        transport.with(|g| g.fail_get_game = false);
        client.join().await.unwrap();
        assert!(client.is_polling());
        assert!(client.view().poll_error.is_none());
        wait(2).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_updates_board() {
        let (client, _transport) = client();
        client.join().await.unwrap();
        let result = client.place(0, 0).await.unwrap();
        assert_eq!(result.board.cell(0, 0), Some(Cell::Taken(Piece::X)));
        assert_eq!(client.view().board.cell(0, 0), Some(Cell::Taken(Piece::X)));
        assert!(!result.is_over);
        assert!(client.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_error_is_returned_and_polling_continues() {
        let (client, transport) = client();
        client.join().await.unwrap();
        client.place(1, 1).await.unwrap();
        let err = client.place(1, 1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert!(client.is_polling());
        wait(1).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_during_pending_place_keeps_one_timer() {
        let (client, transport) = client();
        client.join().await.unwrap();
        transport.with(|g| g.place_delay = Duration::from_millis(7000));

        // Refreshes at 3s and 6s complete while the move is outstanding.
        let result = client.place(0, 0).await.unwrap();
        assert_eq!(result.board.cell(0, 0), Some(Cell::Taken(Piece::X)));
        assert_eq!(transport.count(METHOD_GET_GAME), 2);
        assert!(client.is_polling());

        // Back at t=7s: one more refresh at 9s, then one per interval.
        tokio::time::sleep(Duration::from_millis(2010)).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 3);
        wait(2).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_already_over_classifies_without_polling() {
        let (client, transport) = client();
        transport.with(|g| {
            g.over = true;
            g.winner = "p2".to_string();
        });

        let session = client.join().await.unwrap();
        assert_eq!(session.game_id, "g1");
        assert!(!client.is_polling());
        assert_eq!(client.phase(), Phase::GameOver);
        let view = client.view();
        assert!(!view.polling);
        assert_eq!(view.outcome, Some(Outcome::Loss));

        wait(3).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 0);
    }

    #[test]
    fn test_board_index_saturates() {
        assert_eq!(board_index(2), 2);
        assert_eq!(board_index(usize::MAX), i64::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_before_join() {
        let (client, transport) = client();
        let err = client.place(0, 0).await.unwrap_err();
        assert!(matches!(err, ClientError::NotJoined));
        assert_eq!(transport.count(METHOD_PLACE), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_after_game_over() {
        let (client, transport) = client();
        client.join().await.unwrap();
        transport.with(|g| g.over = true);
        wait(1).await;
        assert_eq!(client.view().outcome, Some(Outcome::Draw));

        let err = client.place(2, 2).await.unwrap_err();
        assert!(matches!(err, ClientError::GameOver));
        assert_eq!(transport.count(METHOD_PLACE), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_result_ending_game_stops_polling() {
        let (client, transport) = client();
        client.join().await.unwrap();
        transport.with(|g| g.winner = "p2".to_string());
        transport.with(|g| g.over = true);
        // Result comes back through place rather than the timer.
        let result = client.place(0, 0).await.unwrap();
        assert!(result.is_over);
        assert!(!client.is_polling());
        assert_eq!(client.view().outcome, Some(Outcome::Loss));
        wait(3).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_failure_leaves_client_idle() {
        let (client, transport) = client();
        transport.with(|g| g.fail_join = true);
        let err = client.join().await.unwrap_err();
        assert_eq!(err.to_string(), "Error: join refused");
        assert!(!client.is_polling());
        assert_eq!(client.phase(), Phase::Idle);
        wait(2).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 0);
        assert_eq!(transport.count(METHOD_JOIN), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_result_after_game_over_is_ignored() {
        let (client, _transport) = client();
        client.join().await.unwrap();
        let generation = client.shared.lock().generation;

        let over = GameResult {
            board: Board::default(),
            is_over: true,
            winner_id: "p1".to_string(),
        };
        assert_eq!(client.shared.apply(generation, &over), Some(Outcome::Win));
        assert!(!client.is_polling());

        let mut late = GameResult::default();
        late.board.0[2][2] = Cell::Taken(Piece::O);
        assert_eq!(client.shared.apply(generation, &late), None);
        assert!(!client.is_polling());
        assert_eq!(client.phase(), Phase::GameOver);
        assert_eq!(client.view().board, Board::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_from_previous_session_is_ignored() {
        let (client, _transport) = client();
        client.join().await.unwrap();
        let old_generation = client.shared.lock().generation;
        client.join().await.unwrap();

        let over = GameResult {
            board: Board::default(),
            is_over: true,
            winner_id: "p9".to_string(),
        };
        assert_eq!(client.shared.apply(old_generation, &over), None);
        assert_eq!(client.phase(), Phase::Joined);
        assert!(client.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_winner() {
        let (client, _transport) = client();
        client.join().await.unwrap();
        assert_eq!(client.check_winner(&GameResult::default()), None);
        assert!(client.is_polling());

        let over = GameResult {
            board: Board::default(),
            is_over: true,
            winner_id: String::new(),
        };
        assert_eq!(client.check_winner(&over), Some(Outcome::Draw));
        assert!(!client.is_polling());
        assert!(!client.stop_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_sees_updates() {
        let (client, transport) = client();
        let mut rx = client.subscribe();
        client.join().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().polling);

        transport.with(|g| g.board.0[1][2] = Cell::Taken(Piece::O));
        wait(1).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().board.cell(1, 2),
            Some(Cell::Taken(Piece::O))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let (client, transport) = client();
        client.join().await.unwrap();
        drop(client);
        wait(3).await;
        assert_eq!(transport.count(METHOD_GET_GAME), 0);
    }
}
