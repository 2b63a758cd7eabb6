use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use chatbot_core::config::API_KEY_ENV;
use chatbot_core::{Config, GeminiClient};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod handler;
mod theme;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "chatbot", version)]
#[command(about = "Chat with Google Gemini from the terminal")]
struct Cli {
    /// Gemini model to use
    #[arg(short, long)]
    model: Option<String>,
    /// API key (defaults to $GEMINI_API_KEY, then the config file)
    #[arg(long)]
    api_key: Option<String>,
    /// Start in dark mode
    #[arg(long)]
    dark: bool,
    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where to write logs
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("chatbot")
        .join("chatbot.log")
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(path: &Path, debug: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let log_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path, cli.debug)?;

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;

    let api_key = config.resolve_api_key(cli.api_key.clone()).ok_or_else(|| {
        anyhow!(
            "No Gemini API key. Set {} or pass --api-key, or add \"api_key\" to {}",
            API_KEY_ENV,
            config_path.display()
        )
    })?;
    let model = config.resolve_model(cli.model.clone());

    let client = GeminiClient::new(&api_key, &model).with_base_url(config.base_url());
    let mut app = App::new(Arc::new(client), &model)
        .with_dark_mode(cli.dark || config.dark_mode())
        .with_config_path(config_path);

    info!(model = %model, "starting chat screen");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore()?;

    info!("chat screen closed");
    result
}

async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut events = EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        let Some(event) = events.next().await else {
            break;
        };
        handler::handle_event(app, event);
        if app.has_pending() {
            app.poll_pending().await;
        }
    }

    Ok(())
}
