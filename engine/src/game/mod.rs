mod board;
mod bot_controller;
mod game_state;
mod types;
mod win_detector;

pub use board::{BOARD_CELLS, Board};
pub use bot_controller::{
    BotInput, calculate_heuristic_move, calculate_minimax_move, calculate_move,
    calculate_random_move,
};
pub use game_state::{GameState, ScoreBoard};
pub use types::{Difficulty, Line, Mark, Outcome};
pub use win_detector::{LINES, evaluate};
