use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::random;

/// Number of rows and columns on the board.
pub const SIZE: usize = 3;

/// A game piece. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Piece {
    X,
    O,
}

impl Piece {
    pub fn other(self) -> Piece {
        match self {
            Piece::X => Piece::O,
            Piece::O => Piece::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Piece::X => 'X',
            Piece::O => 'O',
        }
    }
}

impl From<Piece> for i8 {
    fn from(piece: Piece) -> i8 {
        match piece {
            Piece::X => 1,
            Piece::O => -1,
        }
    }
}

impl TryFrom<i8> for Piece {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Piece::X),
            -1 => Ok(Piece::O),
            other => Err(format!("invalid piece value {other}")),
        }
    }
}

/// One space on the board. On the wire: 0 (empty), 1 (X) or -1 (O).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Cell {
    #[default]
    Empty,
    Taken(Piece),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Taken(piece) => Some(piece),
        }
    }
}

impl From<Cell> for i8 {
    fn from(cell: Cell) -> i8 {
        match cell {
            Cell::Empty => 0,
            Cell::Taken(piece) => piece.into(),
        }
    }
}

impl TryFrom<i8> for Cell {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            other => Piece::try_from(other).map(Cell::Taken),
        }
    }
}

/// A 3x3 board, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(pub [[Cell; SIZE]; SIZE]);

impl Board {
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.0.get(row).and_then(|r| r.get(col)).copied()
    }

    /// True when any row, column or diagonal holds three of the same piece.
    pub fn has_winner(&self) -> bool {
        self.winning_piece().is_some()
    }

    pub fn winning_piece(&self) -> Option<Piece> {
        let b = &self.0;
        let mut lines: Vec<[Cell; SIZE]> = Vec::with_capacity(2 * SIZE + 2);
        for i in 0..SIZE {
            lines.push(b[i]);
            lines.push([b[0][i], b[1][i], b[2][i]]);
        }
        lines.push([b[0][0], b[1][1], b[2][2]]);
        lines.push([b[0][2], b[1][1], b[2][0]]);

        lines.into_iter().find_map(|line| match line[0] {
            Cell::Taken(piece) if line.iter().all(|c| *c == Cell::Taken(piece)) => Some(piece),
            _ => None,
        })
    }

    /// True when every space holds a piece.
    pub fn is_complete(&self) -> bool {
        self.0.iter().flatten().all(|c| !c.is_empty())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f, "---+---+---")?;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|c| format!(" {} ", c.piece().map(Piece::symbol).unwrap_or(' ')))
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Full,
    Over,
    OutOfBounds,
    UnknownPlayer,
    NotYourTurn,
    Occupied,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            GameError::Full => "game is full",
            GameError::Over => "game is over",
            GameError::OutOfBounds => "position is outside game board",
            GameError::UnknownPlayer => "player does not exist",
            GameError::NotYourTurn => "you cannot place twice in a row",
            GameError::Occupied => "position is already occupied",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for GameError {}

/// A two-player tic-tac-toe game. The winner is empty until somebody wins;
/// a game that is over with no winner is a draw.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    over: bool,
    winner: String,
    players: HashMap<String, Piece>,
    next_piece: Piece,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::default(),
            over: false,
            winner: String::new(),
            players: HashMap::with_capacity(2),
            next_piece: Piece::X,
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn over(&self) -> bool {
        self.over
    }

    pub fn winner(&self) -> &str {
        &self.winner
    }

    pub fn is_full(&self) -> bool {
        self.players.len() == 2
    }

    /// Adds a player. The first player gets X, the second O.
    pub fn new_player(&mut self) -> Result<(String, Piece), GameError> {
        if self.is_full() {
            return Err(GameError::Full);
        }
        let piece = if self.players.is_empty() {
            Piece::X
        } else {
            Piece::O
        };
        let player_id = loop {
            let id = random::player_id();
            if !self.players.contains_key(&id) {
                break id;
            }
        };
        self.players.insert(player_id.clone(), piece);
        Ok((player_id, piece))
    }

    /// Places the player's piece at `[row, col]`, then re-evaluates the
    /// winner and game-over state.
    pub fn place(&mut self, player_id: &str, position: [i64; 2]) -> Result<(), GameError> {
        if self.over {
            return Err(GameError::Over);
        }
        let [row, col] = position;
        if !(0..SIZE as i64).contains(&row) || !(0..SIZE as i64).contains(&col) {
            return Err(GameError::OutOfBounds);
        }
        let (row, col) = (row as usize, col as usize);

        let piece = self
            .players
            .get(player_id)
            .copied()
            .ok_or(GameError::UnknownPlayer)?;
        if piece != self.next_piece {
            return Err(GameError::NotYourTurn);
        }
        if !self.board.0[row][col].is_empty() {
            return Err(GameError::Occupied);
        }
        self.board.0[row][col] = Cell::Taken(piece);

        if self.board.has_winner() {
            self.winner = player_id.to_string();
            self.over = true;
            return Ok(());
        }
        if self.board.is_complete() {
            self.over = true;
            return Ok(());
        }

        self.next_piece = piece.other();
        Ok(())
    }
}
