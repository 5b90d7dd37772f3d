use super::board::is_valid_move;
use super::types::{BOARD_SIZE, Board, EMPTY_BOARD, GameStatus, Mark, WinningLine};
use super::win_detector::{check_win_with_line, evaluate_status};
use crate::debug_log;

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub winning_line: Option<WinningLine>,
    pub last_move: Option<usize>,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: EMPTY_BOARD,
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            winning_line: None,
            last_move: None,
        }
    }

    /// Resumes from an existing position; the side to move follows from the mark counts.
    pub fn from_board(board: Board) -> Self {
        let x_count = board.iter().filter(|&&m| m == Mark::X).count();
        let o_count = board.iter().filter(|&&m| m == Mark::O).count();
        let mut state = Self {
            board,
            current_mark: if x_count > o_count { Mark::O } else { Mark::X },
            status: GameStatus::InProgress,
            winning_line: None,
            last_move: None,
        };
        state.check_game_over();
        state
    }

    pub fn place_mark(&mut self, index: usize) -> Result<(), String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }

        if index >= BOARD_SIZE {
            return Err(format!("Cell {} is out of bounds", index + 1));
        }

        if !is_valid_move(&self.board, index) {
            return Err(format!("Cell {} is already marked", index + 1));
        }

        self.board[index] = self.current_mark;
        self.last_move = Some(index);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        } else {
            debug_log!(
                "Game over: {:?} after {} played cell {}",
                self.status,
                self.current_mark,
                index + 1
            );
        }

        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    fn check_game_over(&mut self) {
        self.status = evaluate_status(&self.board);
        self.winning_line = check_win_with_line(&self.board);
    }

    pub fn get_winner(&self) -> Option<Mark> {
        self.status.winner()
    }
}
