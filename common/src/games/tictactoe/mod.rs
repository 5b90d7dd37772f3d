mod board;
mod bot_controller;
mod game_state;
mod scoreboard;
mod types;
mod win_detector;

pub use board::{
    count_marks, format_board, get_available_moves, is_valid_move, parse_board, validate_board,
};
pub use bot_controller::{
    EASY_RANDOM_PROBABILITY, MEDIUM_OPTIMAL_PROBABILITY, WIN_SCORE, calculate_minimax_move,
    calculate_move, calculate_random_move, find_blocking_move, find_winning_move, select_move,
};
pub use game_state::TicTacToeGameState;
pub use scoreboard::Scoreboard;
pub use types::*;
pub use win_detector::{
    WINNING_LINES, check_win, check_win_with_line, evaluate_status, is_board_full,
};
