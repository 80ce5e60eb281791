use std::fs::File;
use std::io::{self, stdout, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode},
};
use game_core::{Config, ConfigError, GameLoop, GameSession, LoopError, Params, ServeDirection};

use input::TerminalInput;
use renderer::TerminalRenderer;

mod input;
mod renderer;

/// Two-player Pong in the terminal
///
/// Green: W / S. Red: Up / Down. Esc or Ctrl-C leaves at any time.
#[derive(Parser)]
#[command(name = "pong")]
struct Cli {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Points needed to win the match
    #[arg(long)]
    win_score: Option<u32>,
    /// Seed for serve angles; defaults to the clock
    #[arg(long)]
    seed: Option<u64>,
    /// Target frames per second
    #[arg(long, default_value_t = Params::TARGET_FPS)]
    fps: u32,
    /// Which way the ball heads after a point
    #[arg(long, value_enum)]
    serve: Option<ServeArg>,
    /// Where log output goes
    #[arg(long, default_value = "pong.log")]
    log_file: PathBuf,
    /// Milliseconds without a repeat before a key counts as released;
    /// must outlast the terminal's auto-repeat delay
    #[arg(long, default_value_t = 500)]
    hold_ms: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum ServeArg {
    Conceder,
    Random,
}

impl From<ServeArg> for ServeDirection {
    fn from(arg: ServeArg) -> Self {
        match arg {
            ServeArg::Conceder => ServeDirection::TowardConceder,
            ServeArg::Random => ServeDirection::Random,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_file) {
        eprintln!("pong: cannot open log file {}: {e}", cli.log_file.display());
        return ExitCode::FAILURE;
    }

    let session = match load_config(&cli).and_then(|config| {
        let seed = cli.seed.unwrap_or_else(clock_seed);
        GameSession::new(config, seed)
    }) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            eprintln!("pong: invalid configuration: {e}");
            return ExitCode::from(2);
        }
    };

    match play(session, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("pong: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// File values first, then command-line overrides
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    if let Some(win_score) = cli.win_score {
        config.win_score = win_score;
    }
    if let Some(serve) = cli.serve {
        config.serve_direction = serve.into();
    }
    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn play(session: GameSession, cli: &Cli) -> Result<(), LoopError> {
    let guard = TerminalGuard::enter().map_err(LoopError::Render)?;

    let renderer = TerminalRenderer::new(stdout());
    let input = TerminalInput::new(Duration::from_millis(cli.hold_ms), guard.state.release_events);
    let mut game = GameLoop::new(session, renderer, input).with_target_fps(cli.fps);
    let result = game.run();

    drop(guard);
    let score = game.session().score();
    println!("Green {} - {} Red", score.left, score.right);
    result
}

/// Terminal modes switched on so far, so teardown undoes exactly those
#[derive(Debug, Default)]
struct TerminalState {
    raw_mode: bool,
    alternate_screen: bool,
    focus_events: bool,
    release_events: bool,
}

impl TerminalState {
    /// Each flag is set as soon as its mode is on, so a failure part way
    /// through still leaves an accurate record for `restore`
    fn setup<W: Write>(&mut self, out: &mut W, release_supported: bool) -> io::Result<()> {
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        self.alternate_screen = true;

        execute!(out, EnableFocusChange)?;
        self.focus_events = true;

        if release_supported {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.release_events = true;
        }
        Ok(())
    }

    fn restore<W: Write>(&mut self, out: &mut W) {
        if std::mem::take(&mut self.release_events) {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        if std::mem::take(&mut self.focus_events) {
            let _ = execute!(out, DisableFocusChange);
        }
        if std::mem::take(&mut self.alternate_screen) {
            let _ = execute!(out, terminal::LeaveAlternateScreen, cursor::Show);
        }
        if std::mem::take(&mut self.raw_mode) {
            let _ = disable_raw_mode();
        }
    }
}

/// Raw mode and the alternate screen for as long as it lives
struct TerminalGuard {
    state: TerminalState,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self {
            state: TerminalState {
                raw_mode: true,
                ..TerminalState::default()
            },
        };

        let release_supported = terminal::supports_keyboard_enhancement().unwrap_or(false);
        guard.state.setup(&mut stdout(), release_supported)?;
        log::info!(
            "Terminal ready, key release events: {}",
            guard.state.release_events
        );
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.state.restore(&mut stdout());
    }
}
