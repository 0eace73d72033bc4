use std::path::PathBuf;

/// Fatal errors raised by the board, the position histories and the engine.
///
/// These signal a misconfigured game or a programming error; recoverable move
/// failures (full column, offset with nothing to remove) are reported as
/// `Ok(false)` by the move operations instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("board dimensions must be positive (width {width}, height {height})")]
    ZeroDimension { width: usize, height: usize },

    #[error("run length must be at least 1")]
    ZeroRun,

    #[error("run of {run} cannot fit on a {width}x{height} board")]
    ImpracticalRun {
        run: usize,
        width: usize,
        height: usize,
    },

    #[error("position ({row}, {col}) is outside the {width}x{height} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    #[error("position history is empty")]
    EmptyHistory,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid game configuration: {0}")]
    Game(#[from] GameError),
}

/// Errors that can end a line-based game early.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("game error: {0}")]
    Game(#[from] GameError),
}
