use crate::session_rng::SessionRng;
use super::board::Board;
use super::game_state::TicTacToeGameState;
use super::types::{Difficulty, Mark, Position};
use super::win_detector::{check_win, check_win_at};

const HARD_SEARCH_DEPTH: usize = 2;
const WIN_SCORE: i32 = 10;

/// Snapshot of everything the computer player needs, detached from the live game.
#[derive(Debug, Clone, Copy)]
pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            current_mark: state.current_mark(),
        }
    }
}

pub fn select_move(
    state: &TicTacToeGameState,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> Option<Position> {
    calculate_move(difficulty, BotInput::from_game_state(state), rng)
}

pub fn calculate_move(
    difficulty: Difficulty,
    input: BotInput,
    rng: &mut SessionRng,
) -> Option<Position> {
    match difficulty {
        Difficulty::Easy => calculate_random_move(&input, rng),
        Difficulty::Medium => calculate_medium_move(&input, rng),
        Difficulty::Hard => calculate_minimax_move(&input, rng),
        Difficulty::None => None,
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<Position> {
    let available_moves = input.board.available_moves();
    rng.choose(&available_moves).copied()
}

fn calculate_medium_move(input: &BotInput, rng: &mut SessionRng) -> Option<Position> {
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent()?;
    let available_moves = input.board.available_moves();

    if available_moves.is_empty() {
        return None;
    }

    let mut board = input.board;

    if let Some(position) = find_winning_move(&mut board, bot_mark, &available_moves) {
        return Some(position);
    }

    if let Some(position) = find_winning_move(&mut board, opponent_mark, &available_moves) {
        return Some(position);
    }

    calculate_random_move(input, rng)
}

fn find_winning_move(board: &mut Board, mark: Mark, moves: &[Position]) -> Option<Position> {
    for &position in moves {
        board.place(position, mark);
        let winner = check_win_at(board, position).map(|line| line.mark);
        board.clear(position);

        if winner == Some(mark) {
            return Some(position);
        }
    }
    None
}

fn calculate_minimax_move(input: &BotInput, rng: &mut SessionRng) -> Option<Position> {
    let bot_mark = input.current_mark;
    if bot_mark.opponent().is_none() || input.board.available_moves().is_empty() {
        return None;
    }

    let mut board = input.board;
    let (_, best_move) = minimax(&mut board, HARD_SEARCH_DEPTH, bot_mark, bot_mark);

    // Only a board that already holds a line yields no candidate here.
    best_move.or_else(|| calculate_random_move(input, rng))
}

fn minimax(board: &mut Board, depth: usize, player: Mark, bot_mark: Mark) -> (i32, Option<Position>) {
    if depth == 0 || is_terminal(board) {
        return (evaluate_board(board, bot_mark), None);
    }

    let Some(next_player) = player.opponent() else {
        return (evaluate_board(board, bot_mark), None);
    };

    let is_maximizing = player == bot_mark;
    let mut best_score = if is_maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for position in board.available_moves() {
        board.place(position, player);
        let (score, _) = minimax(board, depth - 1, next_player, bot_mark);
        board.clear(position);

        let improves = if is_maximizing {
            score > best_score
        } else {
            score < best_score
        };

        if improves {
            best_score = score;
            best_move = Some(position);
        }
    }

    (best_score, best_move)
}

fn is_terminal(board: &Board) -> bool {
    board.is_full() || check_win(board).is_some()
}

fn evaluate_board(board: &Board, bot_mark: Mark) -> i32 {
    match check_win(board) {
        Some(line) if line.mark == bot_mark => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}
