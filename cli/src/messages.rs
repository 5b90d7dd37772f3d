use tictactoe_common::SessionRng;
use tictactoe_common::tictactoe::{Difficulty, Scoreboard};

pub const STREAK_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// The human won the round.
    Win,
    /// The bot won the round.
    Lose,
    Draw,
    Thinking,
    YourTurn,
    GameStart,
    Idle,
}

fn pool(kind: MessageKind, difficulty: Difficulty) -> &'static [&'static str] {
    use Difficulty::*;
    use MessageKind::*;

    match (kind, difficulty) {
        (Win, Easy) => &[
            "You got me! Want to go again?",
            "Nice one, you're pretty good at this.",
            "Fine, this one is yours. Another round?",
        ],
        (Win, Medium) => &[
            "Well played, fair and square.",
            "I underestimated you. Rematch?",
            "Impressive. Let's go again.",
        ],
        (Win, Hard) => &[
            "That should not be possible. I respect it.",
            "You beat hard mode. Please tell me how.",
        ],
        (Lose, Easy) => &[
            "Got you! Don't worry, try again.",
            "Oops, I won. You were close though.",
        ],
        (Lose, Medium) => &[
            "Too slow! Want to try again?",
            "Saw that one coming. Rematch?",
            "Nice try, but I'm warming up.",
        ],
        (Lose, Hard) => &[
            "Calculated. Did you really think you could win?",
            "The search tree always wins.",
            "Want me to go easy on you next time?",
        ],
        (Draw, Easy) => &[
            "A tie! We're both pretty good.",
            "Nobody wins this time. Again?",
        ],
        (Draw, Medium) => &[
            "Stalemate. You're a worthy opponent.",
            "Evenly matched. One more?",
        ],
        (Draw, Hard) => &[
            "A draw against hard mode. Solid defence.",
            "You survived. Most people don't.",
        ],
        (Thinking, Easy) => &["Hmm, let me think...", "Where should I go..."],
        (Thinking, Medium) => &["Calculating...", "Analyzing the board..."],
        (Thinking, Hard) => &["Searching every line...", "Running minimax..."],
        (YourTurn, Easy) => &["Your move, I believe in you.", "Go ahead, pick a cell."],
        (YourTurn, Medium) => &["Your turn. Choose wisely.", "Make your move, I'm watching."],
        (YourTurn, Hard) => &["Your turn. Make it count.", "Choose carefully."],
        (GameStart, Easy) => &["Let's have fun!", "Ready to play?"],
        (GameStart, Medium) => &["Game on! Show me what you've got.", "Let's do this."],
        (GameStart, Hard) => &["Prepare yourself. I won't go easy.", "Challenge accepted."],
        (Idle, Easy) => &["This is fun!", "I like playing with you."],
        (Idle, Medium) => &["Good game so far.", "You're keeping me on my toes."],
        (Idle, Hard) => &["*analyzing patterns*", "*calculating probabilities*"],
    }
}

fn streak_message(
    kind: MessageKind,
    difficulty: Difficulty,
    scores: &Scoreboard,
) -> Option<String> {
    if !matches!(kind, MessageKind::Win | MessageKind::Lose) {
        return None;
    }
    if scores.bot_streak >= STREAK_THRESHOLD {
        return Some(if difficulty == Difficulty::Hard {
            format!("{} wins in a row! I am inevitable!", scores.bot_streak)
        } else {
            format!("{} wins! I'm on fire!", scores.bot_streak)
        });
    }
    if scores.player_streak >= STREAK_THRESHOLD {
        return Some(if difficulty == Difficulty::Hard {
            format!("{} wins?! Are you cheating?!", scores.player_streak)
        } else {
            format!("{} wins! You're amazing!", scores.player_streak)
        });
    }
    None
}

/// Picks bot chatter, never repeating the previous line of the same kind back to back.
#[derive(Debug, Default)]
pub struct MessagePicker {
    last: Option<(MessageKind, Difficulty, usize)>,
}

impl MessagePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick(
        &mut self,
        kind: MessageKind,
        difficulty: Difficulty,
        scores: &Scoreboard,
        rng: &mut SessionRng,
    ) -> String {
        if let Some(message) = streak_message(kind, difficulty, scores) {
            return message;
        }

        let messages = pool(kind, difficulty);
        let previous = match self.last {
            Some((last_kind, last_difficulty, index))
                if last_kind == kind && last_difficulty == difficulty =>
            {
                Some(index)
            }
            _ => None,
        };

        let index = match previous {
            Some(previous) if messages.len() > 1 => {
                let index = rng.random_range(0..messages.len() - 1);
                if index >= previous { index + 1 } else { index }
            }
            _ => rng.random_range(0..messages.len()),
        };

        self.last = Some((kind, difficulty, index));
        messages[index].to_string()
    }
}
