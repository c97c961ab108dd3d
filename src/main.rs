use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use expense_tracker::config::DEFAULT_CONFIG_FILE;
use expense_tracker::Config;

/// Record expenses, filter them and undo mistakes from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration file. Missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log file, overriding the configured one.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;
    let log_file = args.log_file.as_deref().unwrap_or(config.log_file.as_path());
    setup_logging(log_file)?;

    tracing::info!(config = %args.config.display(), "starting expense tracker");
    run_ui_mode(config)?;
    tracing::info!("expense tracker closed");

    Ok(())
}

/// Tracing goes to a file: stdout is owned by the terminal UI.
fn setup_logging(path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_log)
        .try_init()
        .context("install tracing subscriber")?;

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: Config) -> Result<()> {
    use expense_tracker::ui::{run_ui, App};
    use expense_tracker::{Controller, Model, ViewState};

    let controller = Controller::with_timestamp_format(Model::new(), ViewState::new(), config.timestamp_format);
    let mut app = App::new(controller);
    run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
