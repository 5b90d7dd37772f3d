use super::board::get_available_moves;
use super::types::{Board, Difficulty, Mark, NO_MOVE};
use super::win_detector::{WINNING_LINES, check_win, is_board_full};
use crate::debug_log;
use crate::games::SessionRng;

/// Share of Easy moves that ignore the board entirely.
pub const EASY_RANDOM_PROBABILITY: f64 = 0.7;
/// Share of Medium moves (without a win or block available) that use full search.
pub const MEDIUM_OPTIMAL_PROBABILITY: f64 = 0.5;
pub const WIN_SCORE: i32 = 10;

/// Picks the cell the bot plays as `bot_mark`, or `None` when there is no empty cell
/// (or `bot_mark` is `Mark::Empty`).
pub fn calculate_move(
    difficulty: Difficulty,
    board: &Board,
    bot_mark: Mark,
    rng: &mut SessionRng,
) -> Option<usize> {
    let opponent_mark = bot_mark.opponent()?;
    let available_moves = get_available_moves(board);
    if available_moves.is_empty() {
        return None;
    }

    let index = match difficulty {
        Difficulty::Easy => calculate_easy_move(board, opponent_mark, &available_moves, rng),
        Difficulty::Medium => {
            calculate_medium_move(board, bot_mark, opponent_mark, &available_moves, rng)
        }
        Difficulty::Hard => calculate_minimax_move(board, bot_mark),
    }?;

    debug_log!(
        "{} bot playing {} picked cell {} of {:?}",
        difficulty,
        bot_mark,
        index,
        available_moves
    );
    Some(index)
}

/// Same decision as [`calculate_move`], reported as a cell index or [`NO_MOVE`].
pub fn select_move(
    board: &Board,
    difficulty: Difficulty,
    bot_mark: Mark,
    rng: &mut SessionRng,
) -> i32 {
    calculate_move(difficulty, board, bot_mark, rng).map_or(NO_MOVE, |index| index as i32)
}

fn calculate_easy_move(
    board: &Board,
    opponent_mark: Mark,
    moves: &[usize],
    rng: &mut SessionRng,
) -> Option<usize> {
    if rng.chance(EASY_RANDOM_PROBABILITY) {
        return calculate_random_move(moves, rng);
    }
    find_completing_move(board, opponent_mark).or_else(|| calculate_random_move(moves, rng))
}

fn calculate_medium_move(
    board: &Board,
    bot_mark: Mark,
    opponent_mark: Mark,
    moves: &[usize],
    rng: &mut SessionRng,
) -> Option<usize> {
    if let Some(index) = find_completing_move(board, bot_mark) {
        return Some(index);
    }
    if let Some(index) = find_completing_move(board, opponent_mark) {
        return Some(index);
    }
    if rng.chance(MEDIUM_OPTIMAL_PROBABILITY) {
        return calculate_minimax_move(board, bot_mark);
    }
    calculate_random_move(moves, rng)
}

pub fn calculate_random_move(moves: &[usize], rng: &mut SessionRng) -> Option<usize> {
    rng.choose(moves).copied()
}

/// Cell that completes a line for `mark` right now.
pub fn find_winning_move(board: &Board, mark: Mark) -> Option<usize> {
    find_completing_move(board, mark)
}

/// Cell that stops the opponent of `bot_mark` from completing a line next turn.
pub fn find_blocking_move(board: &Board, bot_mark: Mark) -> Option<usize> {
    find_completing_move(board, bot_mark.opponent()?)
}

fn find_completing_move(board: &Board, mark: Mark) -> Option<usize> {
    WINNING_LINES.iter().find_map(|line| {
        let marked = line.iter().filter(|&&i| board[i] == mark).count();
        let empty = line.iter().find(|&&i| board[i] == Mark::Empty);
        match empty {
            Some(&index) if marked == 2 => Some(index),
            _ => None,
        }
    })
}

/// Exhaustive search; the lowest index wins among equally scored moves.
pub fn calculate_minimax_move(board: &Board, bot_mark: Mark) -> Option<usize> {
    let opponent_mark = bot_mark.opponent()?;
    let mut board = *board;

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in get_available_moves(&board) {
        board[index] = bot_mark;
        let score = minimax(
            &mut board,
            0,
            false,
            bot_mark,
            opponent_mark,
            i32::MIN,
            i32::MAX,
        );
        board[index] = Mark::Empty;

        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

fn minimax(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    opponent_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if let Some(winner) = check_win(board) {
        return if winner == bot_mark {
            WIN_SCORE - depth
        } else {
            depth - WIN_SCORE
        };
    }

    if is_board_full(board) {
        return 0;
    }

    let moves = get_available_moves(board);

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in moves {
            board[index] = bot_mark;
            let eval = minimax(board, depth + 1, false, bot_mark, opponent_mark, alpha, beta);
            board[index] = Mark::Empty;

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in moves {
            board[index] = opponent_mark;
            let eval = minimax(board, depth + 1, true, bot_mark, opponent_mark, alpha, beta);
            board[index] = Mark::Empty;

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{GameStatus, evaluate_status, parse_board};
    use std::collections::HashSet;

    const ALL_DIFFICULTIES: [Difficulty; 3] =
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    fn board(text: &str) -> Board {
        parse_board(text).unwrap()
    }

    fn next_to_move(board: &Board) -> Mark {
        let x = board.iter().filter(|&&m| m == Mark::X).count();
        let o = board.iter().filter(|&&m| m == Mark::O).count();
        if x > o { Mark::O } else { Mark::X }
    }

    fn collect_reachable(board: &mut Board, seen: &mut HashSet<Board>) {
        if !seen.insert(*board) || evaluate_status(board).is_over() {
            return;
        }
        let mark = next_to_move(board);
        for index in get_available_moves(board) {
            board[index] = mark;
            collect_reachable(board, seen);
            board[index] = Mark::Empty;
        }
    }

    fn reachable_in_progress() -> Vec<Board> {
        let mut seen = HashSet::new();
        collect_reachable(&mut [Mark::Empty; 9], &mut seen);
        seen.into_iter()
            .filter(|b| !evaluate_status(b).is_over())
            .collect()
    }

    fn completes_line(board: &Board, index: usize, mark: Mark) -> bool {
        WINNING_LINES.iter().any(|line| {
            line.contains(&index)
                && line
                    .iter()
                    .filter(|&&i| i != index)
                    .all(|&i| board[i] == mark)
        })
    }

    #[test]
    fn test_full_board_returns_sentinel() {
        let full = board("XOX OXO OXO");
        for difficulty in ALL_DIFFICULTIES {
            for seed in 0..10 {
                let mut rng = SessionRng::new(seed);
                assert_eq!(select_move(&full, difficulty, Mark::X, &mut rng), NO_MOVE);
                assert_eq!(select_move(&full, difficulty, Mark::O, &mut rng), NO_MOVE);
            }
        }
    }

    #[test]
    fn test_empty_bot_mark_has_no_move() {
        let mut rng = SessionRng::new(0);
        assert_eq!(
            calculate_move(Difficulty::Hard, &[Mark::Empty; 9], Mark::Empty, &mut rng),
            None
        );
    }

    #[test]
    fn test_immediate_win_is_taken() {
        let position = board("XX. OO. ...");
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            for seed in 0..20 {
                let mut rng = SessionRng::new(seed);
                assert_eq!(select_move(&position, difficulty, Mark::X, &mut rng), 2);
            }
        }
    }

    #[test]
    fn test_immediate_block_is_taken() {
        let cases = [
            (board("OO. X.. ..."), Mark::X),
            (board("XX. O.. ..."), Mark::O),
        ];
        for (position, bot_mark) in cases {
            for difficulty in [Difficulty::Medium, Difficulty::Hard] {
                for seed in 0..20 {
                    let mut rng = SessionRng::new(seed);
                    assert_eq!(select_move(&position, difficulty, bot_mark, &mut rng), 2);
                }
            }
        }
    }

    #[test]
    fn test_win_preferred_over_block() {
        let position = board("OO. XX. X..");
        assert_eq!(find_winning_move(&position, Mark::O), Some(2));
        assert_eq!(find_blocking_move(&position, Mark::O), Some(5));
        let mut rng = SessionRng::new(9);
        assert_eq!(
            calculate_move(Difficulty::Medium, &position, Mark::O, &mut rng),
            Some(2)
        );
    }

    #[test]
    fn test_shortcuts_follow_line_order() {
        // X threatens both the middle row (5) and the left column (6).
        let position = board("XO. XX. .OO");
        assert_eq!(find_winning_move(&position, Mark::X), Some(5));
        assert_eq!(find_blocking_move(&position, Mark::O), Some(5));
        assert_eq!(find_blocking_move(&position, Mark::Empty), None);
    }

    #[test]
    fn test_hard_is_deterministic() {
        let position = board("X... O....");
        let first = calculate_minimax_move(&position, Mark::X);
        for seed in 0..10 {
            let mut rng = SessionRng::new(seed);
            assert_eq!(calculate_move(Difficulty::Hard, &position, Mark::X, &mut rng), first);
        }
    }

    #[test]
    fn test_hard_opening_is_in_range() {
        for bot_mark in [Mark::X, Mark::O] {
            let mut rng = SessionRng::new(0);
            let index = select_move(&[Mark::Empty; 9], Difficulty::Hard, bot_mark, &mut rng);
            assert!((0..9).contains(&index));
        }
    }

    #[test]
    fn test_hard_ties_resolve_to_lowest_index() {
        assert_eq!(calculate_minimax_move(&[Mark::Empty; 9], Mark::X), Some(0));

        // Only the centre holds a corner opening to a draw.
        let position = board("X.. ... ...");
        assert_eq!(calculate_minimax_move(&position, Mark::O), Some(4));

        // Two winning cells: row completion at 2 comes before column completion at 6.
        let position = board("XX. X.. .OO");
        assert_eq!(calculate_minimax_move(&position, Mark::X), Some(2));
    }

    #[test]
    fn test_hard_delays_unavoidable_loss() {
        // O cannot stop the fork after blocking, but blocking still loses later than anything else.
        let position = board("XX. O.. ...");
        assert_eq!(calculate_minimax_move(&position, Mark::O), Some(2));
    }

    fn play_against_everything(
        board: &mut Board,
        to_move: Mark,
        bot_mark: Mark,
        rng: &mut SessionRng,
    ) {
        let status = evaluate_status(board);
        if status.is_over() {
            assert_ne!(
                status.winner(),
                bot_mark.opponent(),
                "hard bot lost: {:?}",
                board
            );
            return;
        }
        let opponent = to_move.opponent().unwrap();
        if to_move == bot_mark {
            let index = calculate_move(Difficulty::Hard, board, bot_mark, rng).unwrap();
            assert_eq!(board[index], Mark::Empty);
            board[index] = bot_mark;
            play_against_everything(board, opponent, bot_mark, rng);
            board[index] = Mark::Empty;
        } else {
            for index in get_available_moves(board) {
                board[index] = to_move;
                play_against_everything(board, opponent, bot_mark, rng);
                board[index] = Mark::Empty;
            }
        }
    }

    #[test]
    fn test_hard_never_loses() {
        let mut rng = SessionRng::new(0);
        for bot_mark in [Mark::X, Mark::O] {
            play_against_everything(&mut [Mark::Empty; 9], Mark::X, bot_mark, &mut rng);
        }
    }

    #[test]
    fn test_medium_always_completes_own_line() {
        let mut checked = 0;
        for position in reachable_in_progress() {
            let bot_mark = next_to_move(&position);
            let Some(expected) = find_winning_move(&position, bot_mark) else {
                continue;
            };
            for seed in 0..3 {
                let mut rng = SessionRng::new(seed);
                let index = calculate_move(Difficulty::Medium, &position, bot_mark, &mut rng);
                assert_eq!(index, Some(expected));
                assert!(completes_line(&position, expected, bot_mark));
            }
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_medium_always_blocks_without_own_win() {
        let mut checked = 0;
        for position in reachable_in_progress() {
            let bot_mark = next_to_move(&position);
            if find_winning_move(&position, bot_mark).is_some() {
                continue;
            }
            let Some(expected) = find_blocking_move(&position, bot_mark) else {
                continue;
            };
            let opponent = bot_mark.opponent().unwrap();
            for seed in 0..3 {
                let mut rng = SessionRng::new(seed);
                let index = calculate_move(Difficulty::Medium, &position, bot_mark, &mut rng);
                assert_eq!(index, Some(expected));
                assert!(completes_line(&position, expected, opponent));
            }
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_every_difficulty_plays_legal_moves() {
        let positions = [board("........."), board("X...O...."), board("XOX.O.X..")];
        for position in positions {
            let bot_mark = next_to_move(&position);
            for difficulty in ALL_DIFFICULTIES {
                for seed in 0..25 {
                    let mut rng = SessionRng::new(seed);
                    let index = calculate_move(difficulty, &position, bot_mark, &mut rng).unwrap();
                    assert_eq!(position[index], Mark::Empty);
                }
            }
        }
    }

    #[test]
    fn test_easy_blocks_about_a_third_of_the_time() {
        // Six empty cells: block chance is 0.3 + 0.7 / 6.
        let position = board("XX. O.. ...");
        let trials = 2000;
        let mut blocks = 0;
        let mut rng = SessionRng::new(2024);
        for _ in 0..trials {
            if calculate_move(Difficulty::Easy, &position, Mark::O, &mut rng) == Some(2) {
                blocks += 1;
            }
        }
        let rate = blocks as f64 / trials as f64;
        assert!(rate > 0.35 && rate < 0.48, "block rate {}", rate);
    }

    #[test]
    fn test_medium_plays_best_move_about_half_the_time() {
        // Corner opening: only the center holds the draw, nothing to win or block.
        let position = board("X.. ... ...");
        assert_eq!(find_winning_move(&position, Mark::O), None);
        assert_eq!(find_blocking_move(&position, Mark::O), None);
        assert_eq!(calculate_minimax_move(&position, Mark::O), Some(4));

        // Eight empty cells: center chance is 0.5 + 0.5 / 8.
        let trials = 2000;
        let mut centers = 0;
        let mut rng = SessionRng::new(77);
        for _ in 0..trials {
            if calculate_move(Difficulty::Medium, &position, Mark::O, &mut rng) == Some(4) {
                centers += 1;
            }
        }
        let rate = centers as f64 / trials as f64;
        assert!(rate > 0.51 && rate < 0.62, "center rate {}", rate);
    }

    #[test]
    fn test_easy_is_reproducible_with_seed() {
        let position = board("X...O....");
        let play = |seed| {
            let mut rng = SessionRng::new(seed);
            (0..10)
                .map(|_| calculate_move(Difficulty::Easy, &position, Mark::X, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(play(11), play(11));
    }

    #[test]
    fn test_hard_against_itself_draws() {
        let mut position = [Mark::Empty; 9];
        let mut rng = SessionRng::new(5);
        let mut mark = Mark::X;
        while !evaluate_status(&position).is_over() {
            let index = calculate_move(Difficulty::Hard, &position, mark, &mut rng).unwrap();
            position[index] = mark;
            mark = mark.opponent().unwrap();
        }
        assert_eq!(evaluate_status(&position), GameStatus::Draw);
    }
}
