//! uservault binary entry point.
//!
//! Parses the command line, sets up file logging, initializes the terminal
//! in raw mode, runs the TUI event loop, and restores the terminal on exit.
//!
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use uservault::api::HttpGateway;
use uservault::app::keymap::Keymap;
use uservault::app::{self, AppState, Route, Theme};
use uservault::controller::Controller;
use uservault::export::Exporter;

/// Manage user records on a UserVault backend from the terminal.
#[derive(Debug, Parser)]
#[command(name = "uservault", version, about)]
struct Args {
    /// Backend base URL, e.g. http://localhost:5000
    #[arg(long, env = "USERVAULT_SERVER_URL")]
    server_url: String,

    /// Client route to open at startup (/, /users, /users/add, /users/edit/ID, /users/ID)
    #[arg(long, default_value = "/")]
    route: String,

    /// Directory the PDF report is written to
    #[arg(long, env = "USERVAULT_EXPORT_DIR", default_value = ".")]
    export_dir: PathBuf,

    /// Log file; the terminal itself is taken by the UI
    #[arg(long, env = "USERVAULT_LOG_FILE", default_value = "uservault.log")]
    log_file: PathBuf,

    /// Directory holding theme.conf and keybinds.conf
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uservault=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let Some(initial) = Route::parse(&args.route) else {
        bail!("unknown route: {}", args.route);
    };

    let config_dir = app::config_dir(args.config_dir.as_deref());
    let theme = Theme::load_or_init(&config_dir.join("theme.conf"));
    let keymap = Keymap::load_or_init(&config_dir.join("keybinds.conf"));

    tracing::info!(server = %args.server_url, route = %initial.path(), "starting uservault");
    let controller = Controller::new(Box::new(HttpGateway::new(args.server_url)));
    let exporter = Exporter::with_default_renderer(args.export_dir);
    let mut state = AppState::new(controller, exporter, theme, keymap);

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &mut state, initial).await;

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
