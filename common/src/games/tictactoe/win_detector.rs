use super::types::{Board, GameStatus, Mark, WinningLine};

/// Rows, then columns, then the two diagonals. Search and shortcuts scan in this order.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    WINNING_LINES.iter().find_map(|&[a, b, c]| {
        let mark = board[a];
        if mark != Mark::Empty && board[b] == mark && board[c] == mark {
            Some(WinningLine::new(mark, [a, b, c]))
        } else {
            None
        }
    })
}

pub fn is_board_full(board: &Board) -> bool {
    board.iter().all(|&cell| cell != Mark::Empty)
}

pub fn evaluate_status(board: &Board) -> GameStatus {
    match check_win(board) {
        Some(Mark::X) => GameStatus::XWon,
        Some(Mark::O) => GameStatus::OWon,
        Some(Mark::Empty) => unreachable!(),
        None if is_board_full(board) => GameStatus::Draw,
        None => GameStatus::InProgress,
    }
}
