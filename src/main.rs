use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod app;
mod catalog;
mod chat;
mod config;
mod error;
mod handler;
mod input;
mod nav;
mod pages;
mod search;
mod store;
mod tui;
mod ui;

use app::App;
use config::Config;
use store::LocalStore;
use tui::EventHandler;

const DEFAULT_LOG_FILTER: &str = "myafs=info";

#[derive(Parser)]
#[command(name = "myafs")]
#[command(about = "Terminal dashboard for the myAFS developer platform")]
struct Cli {
    /// Route to open at startup, e.g. /deploy
    #[arg(short, long)]
    route: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Forget that the assistant already greeted this user
    #[arg(long)]
    reset_welcome: bool,

    /// Write the effective config to the config path and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    if cli.init_config {
        config.save_to(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    setup_tracing(config.log_filter.as_deref());

    if let Some(route) = cli.route {
        config.start_route = Some(route);
    }

    let mut store = LocalStore::open_default().context("opening local storage")?;
    if cli.reset_welcome {
        store.remove(chat::WELCOME_FLAG_KEY)?;
    }
    tracing::info!(
        config = %config_path.display(),
        storage = %store.path().display(),
        "starting dashboard"
    );

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(config.tick_rate());
    let mut app = App::new(&config, &mut store, events.sender());

    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    tracing::info!("dashboard closed");
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}

/// Log to a file under the data directory; the terminal belongs to the UI.
fn setup_tracing(filter: Option<&str>) {
    use std::fs::OpenOptions;

    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let Some(log_dir) = dirs::data_dir().map(|dir| dir.join("myafs")) else {
        return;
    };
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    let log_path = log_dir.join("myafs.log");
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_LOG_FILTER)));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::debug!(path = ?log_path, "tracing initialized");
}
