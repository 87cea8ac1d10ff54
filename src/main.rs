use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs,
    fs::OpenOptions,
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use keytally::{
    app::App,
    app_dirs::AppDirs,
    audio::TerminalBell,
    keymap::Command,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    store::{FileRecordStore, RecordStore},
    ui, TICK_RATE_MS,
};

/// terminal keyboard activity tracker
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Counts your key presses in the terminal: session and all-time totals, a daily count that survives restarts, a rolling press rate, and a simulated auto-press mode."
)]
pub struct Cli {
    /// start with the sound cue muted
    #[clap(short = 'm', long)]
    muted: bool,

    /// start with auto-press already running
    #[clap(long)]
    auto_press: bool,

    /// counter state file (defaults to the platform state directory)
    #[clap(long)]
    data_file: Option<PathBuf>,

    /// keep no state on disk at all
    #[clap(long)]
    ephemeral: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let store: Option<Box<dyn RecordStore>> = if cli.ephemeral {
        None
    } else {
        Some(Box::new(match &cli.data_file {
            Some(path) => FileRecordStore::with_path(path),
            None => FileRecordStore::new(),
        }))
    };

    let mut app = App::new(store, Box::new(TerminalBell));
    if cli.muted {
        app.apply(Command::ToggleSound);
    }
    if cli.auto_press {
        app.apply(Command::ToggleAutoPress);
    }
    info!("keyboard counter initialized");

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let source = CrosstermEventSource::new();
    let ticker = FixedTicker::new(Duration::from_millis(TICK_RATE_MS));
    let runner = Runner::new(source, ticker);

    // Restored values render before the first event arrives.
    terminal.draw(|f| ui::render(app, f))?;

    loop {
        let redraw = app.handle_event(runner.step());

        if app.should_quit {
            break;
        }
        if redraw {
            terminal.draw(|f| ui::render(app, f))?;
        }
    }

    Ok(())
}

/// Diagnostics go to a file in the state dir; stdout belongs to the TUI.
/// Logging is best-effort: any setup failure leaves it disabled.
fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
