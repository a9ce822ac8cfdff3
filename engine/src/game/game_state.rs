use crate::config::GameConfig;
use crate::error::GameError;

use super::board::{BOARD_CELLS, Board};
use super::types::{Difficulty, Mark, Outcome};
use super::win_detector::evaluate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl ScoreBoard {
    pub fn rounds(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Win { mark: Mark::X, .. } => self.x_wins += 1,
            Outcome::Win { mark: Mark::O, .. } => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            _ => {}
        }
    }
}

/// Game-state core: current board, move history, outcome and the running
/// score. Turn ownership is derived from the ply index, even plies belong
/// to X.
#[derive(Debug)]
pub struct GameState {
    board: Board,
    history: Vec<Board>,
    current_move: usize,
    status: Outcome,
    score: ScoreBoard,
    computer_opponent: bool,
    computer_mark: Mark,
    difficulty: Difficulty,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            board: Board::new(),
            history: vec![Board::new()],
            current_move: 0,
            status: Outcome::InProgress,
            score: ScoreBoard::default(),
            computer_opponent: config.computer_opponent,
            computer_mark: config.computer_mark,
            difficulty: config.difficulty,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Outcome {
        self.status
    }

    pub fn score(&self) -> ScoreBoard {
        self.score
    }

    pub fn current_move(&self) -> usize {
        self.current_move
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn computer_opponent(&self) -> bool {
        self.computer_opponent
    }

    pub fn computer_mark(&self) -> Mark {
        self.computer_mark
    }

    pub fn current_mark(&self) -> Mark {
        if self.current_move % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        self.computer_opponent
            && self.status == Outcome::InProgress
            && self.current_mark() == self.computer_mark
    }

    pub fn place_mark(&mut self, index: usize) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        if index >= BOARD_CELLS {
            return Err(GameError::CellOutOfRange(index));
        }
        if self.board.cell(index) != Mark::Empty {
            return Err(GameError::CellOccupied(index));
        }

        self.board.set(index, self.current_mark());

        // A move made after a rewind overwrites the redo branch.
        self.history.truncate(self.current_move + 1);
        self.history.push(self.board);
        self.current_move += 1;

        self.status = evaluate(&self.board);
        if self.status.is_terminal() {
            self.score.record(&self.status);
        }

        Ok(())
    }

    /// Rewinds (or replays) to a recorded snapshot. The outcome is
    /// re-evaluated at the target board, so jumping onto a finished
    /// position reports it as finished; the score tally only moves on
    /// move-driven transitions.
    pub fn jump_to(&mut self, ply: usize) -> Result<(), GameError> {
        if ply >= self.history.len() {
            return Err(GameError::InvalidHistoryIndex(ply));
        }
        self.current_move = ply;
        self.board = self.history[ply];
        self.status = evaluate(&self.board);
        Ok(())
    }

    pub fn undo(&mut self) -> Result<(), GameError> {
        self.jump_to(self.current_move.saturating_sub(1))
    }

    pub fn reset(&mut self) {
        // Alternate who goes first against the computer between rounds.
        if self.computer_opponent
            && self.status.is_terminal()
            && let Some(opponent) = self.computer_mark.opponent()
        {
            self.computer_mark = opponent;
        }

        self.board = Board::new();
        self.history = vec![Board::new()];
        self.current_move = 0;
        self.status = Outcome::InProgress;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_computer_opponent(&mut self, enabled: bool) {
        self.computer_opponent = enabled;
    }

    pub fn set_computer_mark(&mut self, mark: Mark) {
        self.computer_mark = mark;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use Mark::{O, X};

    fn human_vs_human() -> GameState {
        GameState::new(&GameConfig {
            computer_opponent: false,
            ..GameConfig::default()
        })
    }

    fn play(state: &mut GameState, moves: &[usize]) {
        for &index in moves {
            state.place_mark(index).unwrap();
        }
    }

    #[test]
    fn test_place_mark_alternates_marks() {
        let mut state = human_vs_human();
        play(&mut state, &[4, 0, 8]);

        assert_eq!(state.board().cell(4), X);
        assert_eq!(state.board().cell(0), O);
        assert_eq!(state.board().cell(8), X);
        assert_eq!(state.current_mark(), O);
        assert_eq!(state.current_move(), 3);
        assert_eq!(state.history_len(), 4);
    }

    #[test]
    fn test_place_mark_rejects_occupied_cell() {
        let mut state = human_vs_human();
        play(&mut state, &[4]);

        assert_eq!(state.place_mark(4), Err(GameError::CellOccupied(4)));
        assert_eq!(state.current_move(), 1);
    }

    #[test]
    fn test_place_mark_rejects_out_of_range() {
        let mut state = human_vs_human();
        assert_eq!(state.place_mark(9), Err(GameError::CellOutOfRange(9)));
    }

    #[test]
    fn test_place_mark_rejects_finished_game() {
        let mut state = human_vs_human();
        play(&mut state, &[0, 3, 1, 4, 2]);

        assert_eq!(state.status().winner(), Some(X));
        assert_eq!(state.place_mark(5), Err(GameError::GameOver));
    }

    #[test]
    fn test_win_is_tallied_once() {
        let mut state = human_vs_human();
        play(&mut state, &[0, 3, 1, 4, 2]);

        assert_eq!(state.score().x_wins, 1);
        let _ = state.place_mark(5);
        assert_eq!(state.score().x_wins, 1);
    }

    #[test]
    fn test_draw_is_tallied() {
        let mut state = human_vs_human();
        play(&mut state, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

        assert_eq!(state.status(), Outcome::Draw);
        assert_eq!(state.score().draws, 1);
    }

    #[test]
    fn test_jump_then_move_truncates_redo_history() {
        let mut state = human_vs_human();
        play(&mut state, &[0, 1, 2]);
        assert_eq!(state.history_len(), 4);

        state.jump_to(1).unwrap();
        state.place_mark(5).unwrap();

        assert_eq!(state.history_len(), 3);
        assert_eq!(state.current_move(), 2);
        assert_eq!(state.board().cell(2), Mark::Empty);
        assert_eq!(state.board().cell(5), O);
    }

    #[test]
    fn test_jump_to_rejects_out_of_range() {
        let mut state = human_vs_human();
        play(&mut state, &[0]);

        assert_eq!(state.jump_to(2), Err(GameError::InvalidHistoryIndex(2)));
        assert_eq!(state.current_move(), 1);
    }

    #[test]
    fn test_jump_to_start_restores_empty_board() {
        let mut state = human_vs_human();
        play(&mut state, &[0, 4, 8]);

        state.jump_to(0).unwrap();

        assert!(state.board().is_empty());
        assert_eq!(state.current_mark(), X);
        assert_eq!(state.status(), Outcome::InProgress);
    }

    #[test]
    fn test_jump_onto_finished_position_restores_outcome_without_recount() {
        let mut state = human_vs_human();
        play(&mut state, &[0, 3, 1, 4, 2]);
        assert_eq!(state.score().x_wins, 1);

        state.jump_to(0).unwrap();
        assert_eq!(state.status(), Outcome::InProgress);

        state.jump_to(5).unwrap();
        assert_eq!(state.status().winner(), Some(X));
        assert_eq!(state.score().x_wins, 1);
    }

    #[test]
    fn test_undo_steps_back_one_ply() {
        let mut state = human_vs_human();
        play(&mut state, &[0, 4]);

        state.undo().unwrap();
        assert_eq!(state.current_move(), 1);
        assert_eq!(state.board().cell(4), Mark::Empty);

        // Undoing at the start stays at the start.
        state.undo().unwrap();
        state.undo().unwrap();
        assert_eq!(state.current_move(), 0);
    }

    #[test]
    fn test_reset_preserves_score_and_swaps_computer_mark() {
        let mut state = GameState::new(&GameConfig::default());
        assert_eq!(state.computer_mark(), O);
        play(&mut state, &[0, 3, 1, 4, 2]);

        state.reset();

        assert!(state.board().is_empty());
        assert_eq!(state.current_move(), 0);
        assert_eq!(state.status(), Outcome::InProgress);
        assert_eq!(state.score().x_wins, 1);
        assert_eq!(state.computer_mark(), X);
    }

    #[test]
    fn test_reset_mid_round_keeps_computer_mark() {
        let mut state = GameState::new(&GameConfig::default());
        play(&mut state, &[0, 3]);

        state.reset();
        assert_eq!(state.computer_mark(), O);
    }

    #[test]
    fn test_score_matches_completed_rounds() {
        let mut state = human_vs_human();

        play(&mut state, &[0, 3, 1, 4, 2]);
        state.reset();
        play(&mut state, &[3, 0, 4, 1, 6, 2]);
        state.reset();
        play(&mut state, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

        let score = state.score();
        assert_eq!(score.x_wins, 1);
        assert_eq!(score.o_wins, 1);
        assert_eq!(score.draws, 1);
        assert_eq!(score.rounds(), 3);
    }
}
