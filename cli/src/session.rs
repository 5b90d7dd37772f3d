use std::time::Duration;

use tictactoe_common::SessionRng;
use tictactoe_common::log;
use tictactoe_common::tictactoe::{
    BOARD_SIZE, Board, Difficulty, GameStatus, Mark, NO_MOVE, Scoreboard, TicTacToeGameState,
    select_move,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Opponent;
use crate::messages::{MessageKind, MessagePicker};
use crate::render::{render_board, render_scores};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    Restart,
    ResetScores,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "r" | "restart" => return Ok(Command::Restart),
        "s" | "scores" => return Ok(Command::ResetScores),
        "h" | "help" | "?" => return Ok(Command::Help),
        _ => {}
    }
    let cell: usize = input
        .parse()
        .map_err(|_| format!("Unknown command '{}', type h for help", input))?;
    if cell == 0 || cell > BOARD_SIZE {
        return Err(format!("Cell must be between 1 and {}", BOARD_SIZE));
    }
    Ok(Command::Place(cell - 1))
}

pub const HELP: &str = "1-9 place your mark, r restart the round, s reset scores, q quit";

/// Rounds played at one terminal, either against the bot or between two people.
pub struct PlaySession {
    state: TicTacToeGameState,
    start_board: Board,
    scores: Scoreboard,
    difficulty: Difficulty,
    bot_mark: Option<Mark>,
    rng: SessionRng,
    messages: MessagePicker,
    round_recorded: bool,
}

impl PlaySession {
    pub fn new(
        opponent: Opponent,
        difficulty: Difficulty,
        human_mark: Mark,
        start_board: Board,
        rng: SessionRng,
    ) -> Result<Self, String> {
        let bot_mark = match opponent {
            Opponent::Bot => Some(
                human_mark
                    .opponent()
                    .ok_or_else(|| "Human player must be X or O".to_string())?,
            ),
            Opponent::Human => None,
        };
        let scores = match bot_mark {
            Some(bot_mark) => Scoreboard::new(bot_mark),
            None => Scoreboard::two_player(),
        };
        Ok(Self {
            state: TicTacToeGameState::from_board(start_board),
            start_board,
            scores,
            difficulty,
            bot_mark,
            rng,
            messages: MessagePicker::new(),
            round_recorded: false,
        })
    }

    pub fn state(&self) -> &TicTacToeGameState {
        &self.state
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    pub fn has_bot(&self) -> bool {
        self.bot_mark.is_some()
    }

    pub fn is_bot_turn(&self) -> bool {
        !self.state.status.is_over() && self.bot_mark == Some(self.state.current_mark)
    }

    /// Plays the bot's reply. `None` when the engine reports no legal move.
    pub fn play_bot_move(&mut self) -> Result<Option<usize>, String> {
        let Some(bot_mark) = self.bot_mark else {
            return Err("There is no bot in a two-player game".to_string());
        };
        let index = select_move(&self.state.board, self.difficulty, bot_mark, &mut self.rng);
        if index == NO_MOVE {
            return Ok(None);
        }
        let index = index as usize;
        self.state.place_mark(index)?;
        Ok(Some(index))
    }

    pub fn play_human_move(&mut self, index: usize) -> Result<(), String> {
        if self.is_bot_turn() {
            return Err("Wait for the bot to move".to_string());
        }
        self.state.place_mark(index)
    }

    /// Records a finished round once. Returns `false` while in progress or when already counted.
    pub fn finish_round(&mut self) -> bool {
        if !self.state.status.is_over() || self.round_recorded {
            return false;
        }
        self.scores.record(self.state.status);
        self.round_recorded = true;
        log!(
            "Round finished: {:?} ({})",
            self.state.status,
            render_scores(&self.scores)
        );
        true
    }

    /// The bot's comment on the finished round; `None` in two-player games.
    pub fn reaction(&mut self) -> Option<String> {
        let bot_mark = self.bot_mark?;
        let kind = match self.state.status {
            GameStatus::InProgress => return None,
            GameStatus::Draw => MessageKind::Draw,
            status if status.winner() == Some(bot_mark) => MessageKind::Lose,
            _ => MessageKind::Win,
        };
        self.message(kind)
    }

    /// Back to the starting position, or an empty board if that position was already decided.
    pub fn restart(&mut self) {
        self.state = TicTacToeGameState::from_board(self.start_board);
        if self.state.status.is_over() {
            self.state.reset();
        }
        self.round_recorded = false;
    }

    pub fn reset_scores(&mut self) {
        self.scores.reset();
    }

    /// Bot chatter; two-player games have none.
    pub fn message(&mut self, kind: MessageKind) -> Option<String> {
        self.bot_mark?;
        Some(self.messages.pick(kind, self.difficulty, &self.scores, &mut self.rng))
    }

    fn outcome_line(&self) -> String {
        let Some(winner) = self.state.status.winner() else {
            return "It's a draw!".to_string();
        };
        match self.bot_mark {
            Some(bot_mark) if bot_mark == winner => format!("{} wins. The bot takes it.", winner),
            Some(_) => format!("{} wins. You beat the bot!", winner),
            None => format!("{} wins!", winner),
        }
    }
}

fn say(session: &mut PlaySession, kind: MessageKind) {
    if let Some(text) = session.message(kind) {
        println!("Bot: {}", text);
    }
}

/// Runs the interactive loop on stdin/stdout until the player quits or input ends.
pub async fn run(
    mut session: PlaySession,
    thinking_delay: Option<Duration>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    say(&mut session, MessageKind::GameStart);

    loop {
        if session.state().status.is_over() {
            let state = session.state();
            println!("\n{}\n", render_board(&state.board, state.winning_line.as_ref()));
            if session.finish_round() {
                println!("{}", session.outcome_line());
                if let Some(reaction) = session.reaction() {
                    println!("Bot: {}", reaction);
                }
                println!("{}", render_scores(session.scores()));
            }
            println!("Press enter for another round, s to reset scores, q to quit.");
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::ResetScores) => {
                    session.reset_scores();
                    println!("{}", render_scores(session.scores()));
                }
                _ => {}
            }
            session.restart();
            say(&mut session, MessageKind::GameStart);
            continue;
        }

        if session.is_bot_turn() {
            say(&mut session, MessageKind::Thinking);
            if let Some(delay) = thinking_delay {
                tokio::time::sleep(delay).await;
            }
            if session.play_bot_move()?.is_none() {
                log!("Bot found no legal move on {:?}", session.state().board);
            }
            continue;
        }

        println!("\n{}\n", render_board(&session.state().board, None));
        if session.has_bot() {
            say(&mut session, MessageKind::YourTurn);
        } else {
            println!("{} to move.", session.state().current_mark);
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(Command::Place(index)) => {
                if let Err(err) = session.play_human_move(index) {
                    println!("{}", err);
                }
            }
            Ok(Command::Restart) => session.restart(),
            Ok(Command::ResetScores) => {
                session.reset_scores();
                println!("{}", render_scores(session.scores()));
            }
            Ok(Command::Help) => {
                println!("{}", HELP);
                say(&mut session, MessageKind::Idle);
            }
            Ok(Command::Quit) => break,
            Err(err) => println!("{}", err),
        }
    }

    println!("{}", render_scores(session.scores()));
    Ok(())
}
