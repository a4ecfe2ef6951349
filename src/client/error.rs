use std::fmt;

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request did not complete as a JSON-RPC exchange.
    Transport,
    /// The server answered with an error payload.
    Server,
    /// The call is not valid in the client's current session state.
    Session,
}

#[derive(Debug)]
pub enum ClientError {
    Transport(reqwest::Error),
    Http { status: u16, body: String },
    Protocol(String),
    Server(String),
    NotJoined,
    GameOver,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) | ClientError::Http { .. } | ClientError::Protocol(_) => {
                ErrorKind::Transport
            }
            ClientError::Server(_) => ErrorKind::Server,
            ClientError::NotJoined | ClientError::GameOver => ErrorKind::Session,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "HTTP error: {e}"),
            ClientError::Http { status, body } => write!(f, "server returned {status}: {body}"),
            ClientError::Protocol(msg) => write!(f, "malformed response: {msg}"),
            ClientError::Server(msg) => write!(f, "Error: {msg}"),
            ClientError::NotJoined => f.write_str("not joined to a game"),
            ClientError::GameOver => f.write_str("game is over"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e)
    }
}
