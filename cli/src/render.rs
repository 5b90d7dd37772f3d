use tictactoe_common::tictactoe::{BOARD_WIDTH, Board, Mark, Scoreboard, WinningLine};

/// Empty cells show the 1-based number the player types; winning cells are starred.
pub fn render_board(board: &Board, winning_line: Option<&WinningLine>) -> String {
    let rows: Vec<String> = board
        .chunks(BOARD_WIDTH)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(column, &mark)| {
                    let index = row * BOARD_WIDTH + column;
                    let highlighted = winning_line.is_some_and(|line| line.contains(index));
                    match (mark, highlighted) {
                        (Mark::Empty, _) => format!(" {} ", index + 1),
                        (mark, true) => format!("*{}*", mark),
                        (mark, false) => format!(" {} ", mark),
                    }
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    rows.join("\n---+---+---\n")
}

pub fn render_scores(scores: &Scoreboard) -> String {
    let Some(bot_mark) = scores.bot_mark() else {
        return format!(
            "X: {}   O: {}   Draws: {}",
            scores.x_wins, scores.o_wins, scores.draws
        );
    };
    let human_mark = bot_mark.opponent().unwrap_or(Mark::X);
    format!(
        "You ({}): {}   Bot ({}): {}   Draws: {}",
        human_mark,
        scores.wins_for(human_mark),
        bot_mark,
        scores.wins_for(bot_mark),
        scores.draws
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_common::tictactoe::{GameStatus, check_win_with_line, parse_board};

    #[test]
    fn test_render_empty_cells_show_numbers() {
        let board = parse_board("X.. .O. ...").unwrap();
        assert_eq!(
            render_board(&board, None),
            " X | 2 | 3 \n---+---+---\n 4 | O | 6 \n---+---+---\n 7 | 8 | 9 "
        );
    }

    #[test]
    fn test_render_highlights_winning_line() {
        let board = parse_board("XXX OO. ...").unwrap();
        let line = check_win_with_line(&board);
        let rendered = render_board(&board, line.as_ref());
        assert!(rendered.starts_with("*X*|*X*|*X*\n"));
        assert!(rendered.contains(" O | O | 6 "));
    }

    #[test]
    fn test_render_scores() {
        let mut scores = Scoreboard::new(Mark::O);
        scores.record(GameStatus::XWon);
        scores.record(GameStatus::Draw);
        assert_eq!(render_scores(&scores), "You (X): 1   Bot (O): 0   Draws: 1");
    }

    #[test]
    fn test_render_two_player_scores() {
        let mut scores = Scoreboard::two_player();
        scores.record(GameStatus::OWon);
        assert_eq!(render_scores(&scores), "X: 0   O: 1   Draws: 0");
    }
}
