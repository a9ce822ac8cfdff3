use std::path::PathBuf;

/// Rejected game operations. All variants leave the session untouched;
/// none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("cell {0} is already marked")]
    CellOccupied(usize),

    #[error("cell index {0} is out of range")]
    CellOutOfRange(usize),

    #[error("game is already over")]
    GameOver,

    #[error("not your turn")]
    NotYourTurn,

    #[error("computer move is pending")]
    BotThinking,

    #[error("history index {0} is out of range")]
    InvalidHistoryIndex(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("computer mark must be X or O")]
    InvalidComputerMark,

    #[error("think delay {0} ms is out of range")]
    InvalidThinkDelay(u64),
}
