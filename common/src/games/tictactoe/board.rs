use super::types::{BOARD_SIZE, Board, Mark};
use super::win_detector::WINNING_LINES;

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter(|(_, cell)| **cell == Mark::Empty)
        .map(|(index, _)| index)
        .collect()
}

pub fn is_valid_move(board: &Board, index: usize) -> bool {
    index < BOARD_SIZE && board[index] == Mark::Empty
}

pub fn count_marks(board: &Board, mark: Mark) -> usize {
    board.iter().filter(|&&cell| cell == mark).count()
}

/// Checks that a position could arise from alternating play with X moving first.
pub fn validate_board(board: &Board) -> Result<(), String> {
    let x_count = count_marks(board, Mark::X);
    let o_count = count_marks(board, Mark::O);
    if x_count < o_count || x_count - o_count > 1 {
        return Err(format!(
            "Invalid mark counts: {} X and {} O (X moves first and players alternate)",
            x_count, o_count
        ));
    }

    let x_wins = WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&i| board[i] == Mark::X));
    let o_wins = WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&i| board[i] == Mark::O));
    if x_wins && o_wins {
        return Err("Both players cannot have a winning line".to_string());
    }
    if x_wins && x_count == o_count {
        return Err("X has won, so O cannot have moved afterwards".to_string());
    }
    if o_wins && x_count > o_count {
        return Err("O has won, so X cannot have moved afterwards".to_string());
    }
    Ok(())
}

/// Parses nine cells from `X`, `O` and `.`/`-`/`_` for empty; whitespace is ignored.
pub fn parse_board(text: &str) -> Result<Board, String> {
    let mut board = [Mark::Empty; BOARD_SIZE];
    let mut count = 0;
    for symbol in text.chars().filter(|c| !c.is_whitespace()) {
        let mark = Mark::from_symbol(symbol)
            .ok_or_else(|| format!("Unknown board symbol '{}'", symbol))?;
        if count >= BOARD_SIZE {
            return Err(format!("Board must have exactly {} cells", BOARD_SIZE));
        }
        board[count] = mark;
        count += 1;
    }
    if count != BOARD_SIZE {
        return Err(format!(
            "Board must have exactly {} cells, got {}",
            BOARD_SIZE, count
        ));
    }
    Ok(board)
}

pub fn format_board(board: &Board) -> String {
    board.iter().map(Mark::symbol).collect()
}
