//! Error types

use std::io;
use std::path::PathBuf;

/// Malformed or missing input for a round. The round is not consumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Neither team entered card points, and there was no double win.
    #[error("missing score")]
    MissingScore,

    /// Card points did not parse as an integer.
    #[error("non-numeric score: {0:?}")]
    NonNumeric(String),

    /// Card points outside of the pot.
    #[error("score {0} out of range 0..=100")]
    OutOfRange(i64),

    #[error("unknown tichu call {0:?}")]
    UnknownCall(String),

    #[error("unknown team {0:?}")]
    UnknownTeam(String),
}

/// Failure to read or write the player record table.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("corrupt record file {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("no rounds to undo")]
    EmptyHistory,
    #[error("match has not started")]
    NotStarted,
    #[error("match already started")]
    AlreadyStarted,
    #[error("game over")]
    GameOver,
    #[error("match is not over")]
    NotOver,
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
