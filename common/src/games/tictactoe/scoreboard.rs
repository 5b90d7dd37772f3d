use super::types::{GameStatus, Mark};

/// Running totals across rounds. Streaks are only tracked when one side is the bot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
    pub bot_streak: u32,
    pub player_streak: u32,
    bot_mark: Option<Mark>,
}

impl Scoreboard {
    pub fn new(bot_mark: Mark) -> Self {
        Self {
            bot_mark: Some(bot_mark),
            ..Self::default()
        }
    }

    pub fn two_player() -> Self {
        Self::default()
    }

    pub fn bot_mark(&self) -> Option<Mark> {
        self.bot_mark
    }

    pub fn wins_for(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
            Mark::Empty => 0,
        }
    }

    /// Counts a finished round. Returns `false` for a game still in progress.
    pub fn record(&mut self, status: GameStatus) -> bool {
        match status {
            GameStatus::InProgress => return false,
            GameStatus::XWon => self.x_wins += 1,
            GameStatus::OWon => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
        }

        let Some(bot_mark) = self.bot_mark else {
            return true;
        };
        match status.winner() {
            Some(winner) if winner == bot_mark => {
                self.bot_streak += 1;
                self.player_streak = 0;
            }
            Some(_) => {
                self.player_streak += 1;
                self.bot_streak = 0;
            }
            None => {
                self.bot_streak = 0;
                self.player_streak = 0;
            }
        }
        true
    }

    pub fn reset(&mut self) {
        *self = Self {
            bot_mark: self.bot_mark,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_outcomes() {
        let mut scores = Scoreboard::new(Mark::O);
        assert!(scores.record(GameStatus::XWon));
        assert!(scores.record(GameStatus::OWon));
        assert!(scores.record(GameStatus::Draw));
        assert!(!scores.record(GameStatus::InProgress));
        assert_eq!(scores.wins_for(Mark::X), 1);
        assert_eq!(scores.wins_for(Mark::O), 1);
        assert_eq!(scores.draws, 1);
    }

    #[test]
    fn test_streaks_reset_on_other_outcomes() {
        let mut scores = Scoreboard::new(Mark::O);
        scores.record(GameStatus::OWon);
        scores.record(GameStatus::OWon);
        scores.record(GameStatus::OWon);
        assert_eq!(scores.bot_streak, 3);
        assert_eq!(scores.player_streak, 0);

        scores.record(GameStatus::XWon);
        assert_eq!(scores.bot_streak, 0);
        assert_eq!(scores.player_streak, 1);

        scores.record(GameStatus::Draw);
        assert_eq!(scores.player_streak, 0);
    }

    #[test]
    fn test_reset_keeps_bot_mark() {
        let mut scores = Scoreboard::new(Mark::X);
        scores.record(GameStatus::XWon);
        scores.reset();
        assert_eq!(scores, Scoreboard::new(Mark::X));
        assert_eq!(scores.bot_mark(), Some(Mark::X));
    }

    #[test]
    fn test_two_player_counts_without_streaks() {
        let mut scores = Scoreboard::two_player();
        for _ in 0..3 {
            scores.record(GameStatus::XWon);
        }
        scores.record(GameStatus::OWon);
        assert_eq!(scores.x_wins, 3);
        assert_eq!(scores.o_wins, 1);
        assert_eq!(scores.bot_streak, 0);
        assert_eq!(scores.player_streak, 0);
        assert_eq!(scores.bot_mark(), None);
        scores.reset();
        assert_eq!(scores, Scoreboard::two_player());
    }
}
