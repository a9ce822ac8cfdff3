pub mod config;
pub mod error;
pub mod game;
pub mod logger;
pub mod session;

pub use config::{GameConfig, load_config, save_config};
pub use error::{ConfigError, GameError};
pub use game::{
    BOARD_CELLS, Board, BotInput, Difficulty, GameState, LINES, Line, Mark, Outcome, ScoreBoard,
    calculate_heuristic_move, calculate_minimax_move, calculate_move, calculate_random_move,
    evaluate,
};
pub use session::{GameSession, SessionRng, SessionView};
