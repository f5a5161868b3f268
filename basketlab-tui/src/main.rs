//! basketlab-tui entry point: load the chain, set up the terminal, run the loop.

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use basketlab_core::chain::load_chain_dir;
use basketlab_core::BasketConfig;
use basketlab_tui::{handle_key, ui, AppState};

const LOG_FILE: &str = "basketlab-tui.log";
const DEFAULT_LOG_FILTER: &str = "basketlab=info,basketlab_core=info";

#[derive(Parser)]
#[command(name = "basketlab-tui", about = "Option basket builder with a live P&L curve")]
struct Args {
    /// Directory with records.csv, snapshots.csv and quotes.csv.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// TOML config with `[payoff]`, `[grid]` and `[ladder]` sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file. Defaults to basketlab-tui.log inside the data directory.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal belongs to the UI; logs go to a file.
    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| args.data_dir.join(LOG_FILE));
    init_logging(&log_path)?;

    let config = BasketConfig::load_or_default(args.config.as_deref())?;
    let data = load_chain_dir(&args.data_dir)
        .with_context(|| format!("loading chain data from {}", args.data_dir.display()))?;
    let mut app = AppState::new(data, config);
    info!(records = app.data.book.len(), "tui started");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(legs = app.ledger.len(), "tui exited");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms poll keeps the loop responsive without spinning.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
