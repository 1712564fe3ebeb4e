//! Housing Estimator terminal UI
//!
//! Keyboard-driven form for point predictions and feature curves.

mod app;
mod chart;
mod events;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use estimator_api::ApiClient;
use estimator_config::EstimatorConfig;
use estimator_core::BaseInput;
use estimator_form::FormState;
use events::EventHandler;
use ratatui::prelude::*;
use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

const TICK_RATE_MS: u64 = 100;

/// Filter used until the config file has been read
const BOOT_LOG_FILTER: &str = "info";

type FilterHandle = reload::Handle<EnvFilter, Registry>;

#[derive(Parser)]
#[command(name = "estimator-tui")]
#[command(about = "Terminal front-end for the housing price estimator")]
#[command(version)]
struct Cli {
    /// Config file [default: <config dir>/housing-estimator/config.yaml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and ESTIMATOR_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (log_path, log_filter) = init_logging()?;
    let config = EstimatorConfig::load(cli.config.as_deref(), cli.api_url)?;
    apply_log_filter(log_filter, &config);

    let client = ApiClient::from_config(&config)?;
    tracing::info!(base_url = %client.base_url(), "Starting estimator TUI");

    let mut app = App::new(client, FormState::new(&BaseInput::sample(), &config.curve));
    app.check_health();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new(TICK_RATE_MS);
    let result = run_app(&mut terminal, &mut app, event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Application error: {} (log: {})", e, log_path.display());
    }

    Ok(())
}

/// Log to a file so output does not tear the alternate screen. Logging
/// starts before the config is read; without `RUST_LOG` the returned handle
/// swaps in the configured filter once it is known.
fn init_logging() -> Result<(PathBuf, Option<FilterHandle>)> {
    let dir = EstimatorConfig::log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join("estimator-tui.log");
    let file = File::create(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let from_env = EnvFilter::try_from_default_env().ok();
    let pending = from_env.is_none();
    let (filter, handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new(BOOT_LOG_FILTER)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok((path, pending.then_some(handle)))
}

fn apply_log_filter(handle: Option<FilterHandle>, config: &EstimatorConfig) {
    if let Some(handle) = handle {
        if let Err(e) = handle.reload(EnvFilter::new(&config.log_filter)) {
            tracing::warn!("Failed to apply log filter '{}': {}", config.log_filter, e);
        }
    }
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut event_handler: EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match event_handler.next().await? {
            events::Event::Tick => app.on_tick(),
            events::Event::Key(key) => {
                if app.handle_key(key) {
                    return Ok(());
                }
            }
            // Layout is recomputed on the next draw
            events::Event::Resize => {}
        }
    }
}
