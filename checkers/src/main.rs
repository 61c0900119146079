mod interactive;

use checkers_core::GameState;
use clap::{Args, Parser, Subcommand};
use interactive::{render_board, GameEnd, InteractiveGame, PlayConfig, PlayerKind};
use std::io;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "checkers", version, about = "Checkers in the terminal")]
struct Cli {
    /// Log filter used when RUST_LOG is unset, e.g. `debug` or `checkers_core=trace`
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game (the default)
    Play(PlayArgs),
    /// Print the starting board and exit
    Show,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Who plays Red
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    red: PlayerKind,

    /// Who plays Black (moves first)
    #[arg(long, value_enum, default_value_t = PlayerKind::Greedy)]
    black: PlayerKind,

    /// Seed for reproducible engine moves (greedy and random)
    #[arg(long)]
    seed: Option<u64>,

    /// Pause after errors and engine moves, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pause_ms: u64,

    /// Stop after this many turns
    #[arg(long)]
    max_turns: Option<usize>,

    /// Keep scrollback instead of clearing the screen each turn
    #[arg(long)]
    no_clear: bool,
}

impl From<PlayArgs> for PlayConfig {
    fn from(args: PlayArgs) -> Self {
        PlayConfig {
            red: args.red,
            black: args.black,
            seed: args.seed,
            pause: Duration::from_millis(args.pause_ms),
            max_turns: args.max_turns,
            clear_screen: !args.no_clear,
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn play(config: PlayConfig) -> io::Result<()> {
    info!(?config, "starting game");
    let stdin = io::stdin();
    let mut game = InteractiveGame::new(config, stdin.lock(), io::stdout());

    match game.run()? {
        GameEnd::Winner(winner) => info!(%winner, "game finished"),
        GameEnd::NoMoveAvailable(color) => info!(%color, "game stalled"),
        GameEnd::TurnLimit => info!("turn limit reached"),
        GameEnd::Quit => info!("game abandoned"),
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Some(Command::Play(args)) => play(args.into()),
        Some(Command::Show) => render_board(&mut io::stdout(), &GameState::new()),
        None => play(PlayConfig::default()),
    }
}
