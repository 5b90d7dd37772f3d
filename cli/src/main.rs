mod config;
mod messages;
mod render;
mod session;

use clap::Parser;
use tictactoe_common::tictactoe::{Difficulty, EMPTY_BOARD, Mark, parse_board, validate_board};
use tictactoe_common::{SessionRng, log, logger};

use config::{CONFIG_FILE, Opponent, get_config_manager};
use session::PlaySession;

#[derive(Parser)]
#[command(name = "tictactoe", about = "Play Tic Tac Toe against the bot or a friend")]
struct Args {
    /// Play against the bot, or pass the keyboard between two players.
    #[arg(long, value_enum)]
    opponent: Option<Opponent>,

    /// Overrides the difficulty from the config file.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Which mark you play (X moves first).
    #[arg(long)]
    human: Option<Mark>,

    /// Seed for the bot's randomness, to replay a session.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    /// Starting position, nine cells of X, O and '.', e.g. "X...O....".
    #[arg(long)]
    board: Option<String>,

    /// Writes the effective difficulty and mark back to the config file.
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    no_delay: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(&args.config);
    let mut config = config_manager.get_config()?;

    let prefix = if args.use_log_prefix {
        let prefix = config.log_prefix.as_deref().unwrap_or("TicTacToe");
        Some(prefix.to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    if let Some(opponent) = args.opponent {
        config.opponent = opponent;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(human_mark) = args.human {
        config.human_mark = human_mark;
    }
    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Saved config to {}", args.config);
    }

    let start_board = match args.board.as_deref() {
        Some(text) => {
            let board = parse_board(text)?;
            validate_board(&board)?;
            board
        }
        None => EMPTY_BOARD,
    };

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    match config.opponent {
        Opponent::Bot => log!(
            "Starting {} game as {} (seed {})",
            config.difficulty,
            config.human_mark,
            rng.seed()
        ),
        Opponent::Human => log!("Starting two-player game"),
    }

    let thinking_delay = if args.no_delay || config.opponent == Opponent::Human {
        None
    } else {
        Some(config.thinking_delay.delay_for(config.difficulty))
    };

    let session = PlaySession::new(
        config.opponent,
        config.difficulty,
        config.human_mark,
        start_board,
        rng,
    )?;
    session::run(session, thinking_delay).await?;

    log!("Goodbye");
    Ok(())
}
