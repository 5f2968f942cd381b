//! Setup-time errors
//!
//! The simulation itself never fails; everything here is raised while loading
//! maps and tuning or while starting a session.

use thiserror::Error;

use crate::sim::KeyCode;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("map has no rows")]
    EmptyMap,

    #[error("map row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, ch: char },

    #[error("map has no spawn point for player {player}")]
    MissingSpawn { player: usize },

    #[error("key {key:?} is bound more than once")]
    KeyConflict { key: KeyCode },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
