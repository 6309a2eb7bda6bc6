mod calc;
mod cmd;
mod data;
mod ui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use data::{AppSettings, Persistable};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "peaks.log";

#[derive(Parser)]
#[command(name = "peaks", about = "Taiwan 100 peaks climb tracker")]
struct Cli {
    /// Path to the data directory containing config and data files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data files (resets the climb record)
    Init,
    /// Show overall climb progress
    Stats,
    /// List peaks in rank order
    List {
        /// Match against peak name or location
        #[arg(short, long)]
        search: Option<String>,
        /// Only peaks in this mountain range ("all" for every range)
        #[arg(short, long)]
        range: Option<String>,
    },
    /// List mountain ranges with their peak counts
    Ranges,
    /// Mark a peak climbed, or unmark it if already climbed
    Toggle {
        /// Peak id (e.g. P001)
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    let is_init_command = matches!(cli.command, Some(Commands::Init));
    bootstrap(&data_dir, !is_init_command)?;

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Stats) => cmd::stats::run(),
        Some(Commands::List { search, range }) => {
            cmd::list::run(search.as_deref(), range.as_deref())
        }
        Some(Commands::Ranges) => cmd::ranges::run(),
        Some(Commands::Toggle { id }) => cmd::toggle::run(&id),
    }
}

/// Starts logging, then auto-inits when the data directory is missing or empty
/// and `auto_init` is set. Returns true when it initialized the directory.
fn bootstrap(data_dir: &Path, auto_init: bool) -> anyhow::Result<bool> {
    // Checked first: opening the log file makes the directory non-empty.
    let needs_init = auto_init && dir_needs_init(data_dir);

    let settings = AppSettings::load_from(data_dir).unwrap_or_default();
    init_logging(data_dir, &settings.log_level)?;
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

    if needs_init {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run_in_dir(data_dir)?;
    }
    Ok(needs_init)
}

/// Routes `tracing` output to `peaks.log` in `dir`; stdout belongs to the TUI.
fn init_logging(dir: &Path, default_level: &str) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(default_level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level, then `info`.
fn log_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
