use crate::session::SessionRng;

use super::board::{BOARD_CELLS, Board};
use super::game_state::GameState;
use super::types::{Difficulty, Mark, Outcome};
use super::win_detector::evaluate;

// Center and corners only; an edge is never a good first move.
const OPENING_MOVES: [usize; 5] = [0, 2, 4, 6, 8];

// Center, corners, edges.
const MOVE_PREFERENCE: [usize; 9] = [4, 0, 2, 6, 8, 1, 3, 5, 7];

pub struct BotInput {
    pub board: Board,
    pub mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &GameState) -> Self {
        Self {
            board: *state.board(),
            mark: state.current_mark(),
        }
    }
}

pub fn calculate_move(
    difficulty: Difficulty,
    input: &BotInput,
    rng: &mut SessionRng,
) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => calculate_random_move(&input.board, rng),
        Difficulty::Medium => {
            if rng.random_chance(0.7) {
                calculate_heuristic_move(input, rng)
            } else {
                calculate_random_move(&input.board, rng)
            }
        }
        Difficulty::Hard => calculate_minimax_move(input, rng),
    }
}

pub fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    let moves = board.available_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.random_range(0..moves.len())])
}

/// Depth-1 move selection: opening book, take the win, block the loss,
/// then positional preference. Never searches the game tree.
pub fn calculate_heuristic_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let mark = input.mark;
    let opponent = mark.opponent()?;
    let mut board = input.board;

    if board.is_empty() {
        return Some(OPENING_MOVES[rng.random_range(0..OPENING_MOVES.len())]);
    }

    if let Some(index) = find_winning_move(&mut board, mark) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(&mut board, opponent) {
        return Some(index);
    }

    if let Some(index) = MOVE_PREFERENCE
        .iter()
        .copied()
        .find(|&index| board.cell(index) == Mark::Empty)
    {
        return Some(index);
    }

    calculate_random_move(&board, rng)
}

/// Exhaustive search over the remaining game tree, behind the same
/// opening, win and block shortcuts the shallow picker uses.
pub fn calculate_minimax_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let mark = input.mark;
    let opponent = mark.opponent()?;
    let mut board = input.board;

    let moves = board.available_moves();
    if moves.is_empty() {
        return None;
    }

    if board.is_empty() {
        return Some(OPENING_MOVES[rng.random_range(0..OPENING_MOVES.len())]);
    }

    if let Some(index) = find_winning_move(&mut board, mark) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(&mut board, opponent) {
        return Some(index);
    }

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in moves {
        board.set(index, mark);
        let score = minimax(&mut board, 0, false, mark, opponent, i32::MIN, i32::MAX);
        board.set(index, Mark::Empty);

        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

fn find_winning_move(board: &mut Board, mark: Mark) -> Option<usize> {
    for index in 0..BOARD_CELLS {
        if board.cell(index) != Mark::Empty {
            continue;
        }
        board.set(index, mark);
        let wins = evaluate(board).winner() == Some(mark);
        board.set(index, Mark::Empty);

        if wins {
            return Some(index);
        }
    }
    None
}

fn minimax(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    mark: Mark,
    opponent: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    match evaluate(board) {
        // The depth term rewards faster wins and slower losses.
        Outcome::Win { mark: winner, .. } => {
            return if winner == mark { 10 - depth } else { depth - 10 };
        }
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in 0..BOARD_CELLS {
            if board.cell(index) != Mark::Empty {
                continue;
            }
            board.set(index, mark);
            let eval = minimax(board, depth + 1, false, mark, opponent, alpha, beta);
            board.set(index, Mark::Empty);

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                return max_eval;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in 0..BOARD_CELLS {
            if board.cell(index) != Mark::Empty {
                continue;
            }
            board.set(index, opponent);
            let eval = minimax(board, depth + 1, true, mark, opponent, alpha, beta);
            board.set(index, Mark::Empty);

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                return min_eval;
            }
        }
        min_eval
    }
}
