use checkers_agents::{Agent, GreedyAgent, RandomAgent};
use checkers_core::{CheckersError, Color, ErrorKind, GamePhase, GameState, MoveRequest};
use clap::ValueEnum;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Who makes the moves for one side.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PlayerKind {
    Human,
    Greedy,
    Random,
}

/// Options for one game, resolved from the command line.
#[derive(Clone, Debug)]
pub struct PlayConfig {
    pub red: PlayerKind,
    pub black: PlayerKind,
    /// Seed for engine choices, given to each engine side
    pub seed: Option<u64>,
    /// Pause after an error or an engine move, for readability
    pub pause: Duration,
    /// Stop after this many applied turns
    pub max_turns: Option<usize>,
    /// Clear the terminal before every redraw
    pub clear_screen: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            red: PlayerKind::Human,
            black: PlayerKind::Greedy,
            seed: None,
            pause: Duration::from_millis(1000),
            max_turns: None,
            clear_screen: true,
        }
    }
}

/// How a game loop finished.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameEnd {
    Winner(Color),
    /// The engine for this side found no legal single step.
    NoMoveAvailable(Color),
    TurnLimit,
    Quit,
}

enum Player {
    Human,
    Engine(Box<dyn Agent>),
}

impl Player {
    fn from_kind(kind: PlayerKind, seed: Option<u64>) -> Self {
        match kind {
            PlayerKind::Human => Player::Human,
            PlayerKind::Greedy => Player::Engine(Box::new(match seed {
                Some(seed) => GreedyAgent::with_seed(seed),
                None => GreedyAgent::new(),
            })),
            PlayerKind::Random => Player::Engine(Box::new(match seed {
                Some(seed) => RandomAgent::with_seed(seed),
                None => RandomAgent::new(),
            })),
        }
    }
}

/// What the side to move asked for this time round.
enum TurnInput {
    Move(MoveRequest),
    Undo,
    Help,
    /// Unparseable line
    Invalid(CheckersError),
    Quit,
    NoMove,
}

pub struct InteractiveGame<R, W> {
    state: GameState,
    red: Player,
    black: Player,
    config: PlayConfig,
    message: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveGame<R, W> {
    pub fn new(config: PlayConfig, input: R, output: W) -> Self {
        Self {
            state: GameState::new(),
            red: Player::from_kind(config.red, config.seed),
            black: Player::from_kind(config.black, config.seed.map(|s| s.wrapping_add(1))),
            config,
            message: String::new(),
            input,
            output,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs turns until the game ends. Any rejected move is reported and
    /// the same side is asked again.
    pub fn run(&mut self) -> io::Result<GameEnd> {
        loop {
            let color = match self.state.phase() {
                GamePhase::GameOver(winner) => {
                    self.message = format!("Congrats, {}!", winner);
                    self.draw()?;
                    return Ok(GameEnd::Winner(winner));
                }
                GamePhase::AwaitingMove(color) => color,
            };
            if self
                .config
                .max_turns
                .map_or(false, |max| self.state.history().len() >= max)
            {
                self.message = String::from("Turn limit reached.");
                self.draw()?;
                return Ok(GameEnd::TurnLimit);
            }

            self.draw()?;
            match self.next_input(color)? {
                TurnInput::Quit => return Ok(GameEnd::Quit),
                TurnInput::NoMove => {
                    warn!(%color, "engine has no legal move");
                    self.message = format!("{} has no legal move.", color);
                    self.draw()?;
                    return Ok(GameEnd::NoMoveAvailable(color));
                }
                TurnInput::Help => self.message = help_text(),
                TurnInput::Invalid(err) => {
                    debug!(%color, %err, "input rejected");
                    self.message = rejection_message(&err);
                    self.draw()?;
                    self.pause();
                }
                TurnInput::Undo => self.undo(),
                TurnInput::Move(request) => match self.state.attempt_turn(&request) {
                    Ok(outcome) => {
                        self.message = match outcome.captured.len() {
                            0 => format!("{} played {}", color, request),
                            n => format!("{} played {} capturing {}", color, request, n),
                        };
                        if self.is_engine(color) {
                            self.pause();
                        }
                    }
                    Err(err) => {
                        if self.is_engine(color) && err.kind() != ErrorKind::Input {
                            warn!(%color, %request, %err, "engine move rejected");
                        } else {
                            debug!(%color, %request, %err, "move rejected");
                        }
                        self.message = rejection_message(&err);
                        self.draw()?;
                        self.pause();
                    }
                },
            }
        }
    }

    fn next_input(&mut self, color: Color) -> io::Result<TurnInput> {
        let player = match color {
            Color::Red => &mut self.red,
            Color::Black => &mut self.black,
        };
        match player {
            Player::Engine(agent) => Ok(match agent.best_move(&self.state) {
                Some(request) => {
                    debug!(agent = agent.name(), %request, "engine move");
                    TurnInput::Move(request)
                }
                None => TurnInput::NoMove,
            }),
            Player::Human => {
                write!(
                    self.output,
                    "{}, enter a piece and a sequence of moves separated by commas (e.g. b6,ur): ",
                    color
                )?;
                self.output.flush()?;

                let mut line = String::new();
                if self.input.read_line(&mut line)? == 0 {
                    return Ok(TurnInput::Quit);
                }
                Ok(match line.trim().to_ascii_lowercase().as_str() {
                    "quit" | "q" => TurnInput::Quit,
                    "undo" | "u" => TurnInput::Undo,
                    "help" | "?" => TurnInput::Help,
                    text => match text.parse::<MoveRequest>() {
                        Ok(request) => TurnInput::Move(request),
                        Err(err) => TurnInput::Invalid(err),
                    },
                })
            }
        }
    }

    /// Takes back moves until it is a human's turn again.
    fn undo(&mut self) {
        let mut undone = 0;
        while let Ok(record) = self.state.undo() {
            undone += 1;
            if !self.is_engine(record.color) {
                break;
            }
        }
        self.message = match undone {
            0 => String::from("Nothing to undo"),
            n => format!("Took back {} move(s)", n),
        };
    }

    fn is_engine(&self, color: Color) -> bool {
        let player = match color {
            Color::Red => &self.red,
            Color::Black => &self.black,
        };
        matches!(player, Player::Engine(_))
    }

    fn pause(&self) {
        if !self.config.pause.is_zero() {
            thread::sleep(self.config.pause);
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        if self.config.clear_screen {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        render_board(&mut self.output, &self.state)?;
        if !self.message.is_empty() {
            queue!(self.output, Print(&self.message), Print("\n"))?;
        }
        self.output.flush()
    }
}

fn help_text() -> String {
    String::from(
        "Enter <square>,<dir>[,<dir>...] where dir is ur, ul, dr or dl. \
         One step slides or jumps; several steps must all be jumps. \
         Commands: undo, help, quit",
    )
}

/// Error text for the prompt, with a hint chosen by error class.
fn rejection_message(err: &CheckersError) -> String {
    let hint = match err.kind() {
        ErrorKind::Input => "type help for the move format",
        ErrorKind::InvalidDirection => "uncrowned pieces only move toward the far side",
        ErrorKind::OutOfBounds => "that step leaves the board",
        ErrorKind::IllegalMove => "slides need an empty square, jumps an opposing piece",
        ErrorKind::Game => return err.to_string(),
    };
    format!("{} ({})", err, hint)
}

/// Draws the board with rank 1 at the top, as the coordinates are read.
pub fn render_board<W: Write>(out: &mut W, state: &GameState) -> io::Result<()> {
    let view = state.view();

    queue!(out, Print("   C  H  E  C  K  E  R  S\n"))?;
    for (row, cells) in view.iter().enumerate() {
        queue!(out, Print(format!("{} ", row + 1)))?;
        for (col, cell) in cells.iter().enumerate() {
            let background = if (row + col) % 2 == 0 {
                TermColor::DarkGrey
            } else {
                TermColor::Black
            };
            queue!(out, SetBackgroundColor(background))?;
            match cell {
                Some(piece) => {
                    let foreground = match piece.color {
                        Color::Red => TermColor::Red,
                        Color::Black => TermColor::White,
                    };
                    let symbol = if piece.king { " ♚ " } else { " ◉ " };
                    queue!(out, SetForegroundColor(foreground), Print(symbol))?;
                }
                None => queue!(out, Print("   "))?,
            }
            queue!(out, ResetColor)?;
        }
        queue!(out, Print("\n"))?;
    }
    queue!(out, Print("   A  B  C  D  E  F  G  H\n"))?;

    let status = match state.phase() {
        GamePhase::AwaitingMove(color) => format!(
            "{} to move | Red {} - Black {}\n",
            color,
            state.board().count(Color::Red),
            state.board().count(Color::Black)
        ),
        GamePhase::GameOver(winner) => format!("{} wins\n", winner),
    };
    queue!(out, Print(status))?;
    out.flush()
}
