/// Startup error types. Everything here is fatal: the game never enters
/// its loop once one of these is returned.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON configuration in {path}: {source}")]
    ConfigJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed TOML configuration in {path}: {source}")]
    ConfigToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid maze {path}: {source}")]
    Maze {
        path: PathBuf,
        #[source]
        source: MazeError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("no player start marker 'P'")]
    NoPlayer,
}
