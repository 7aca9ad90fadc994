// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use pagegloss::app_config::{self, Config};
use pagegloss::app_controller::{Controller, PageStatus};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate every pending page (default command)
    Translate,

    /// Show which pages are translated, stale, failed or pending; writes nothing
    Status,

    /// Generate shell completions for pagegloss
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Shared by every subcommand, accepted before or after its name
#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Directory holding page_NNNN.html files
    #[arg(short, long, global = true)]
    input_dir: Option<PathBuf>,

    /// Pages processed between progress checkpoints
    #[arg(short, long, global = true)]
    batch_size: Option<usize>,

    /// Progress file path
    #[arg(short, long, global = true)]
    progress_file: Option<PathBuf>,

    /// JSON glossary file replacing the built-in glossary
    #[arg(short, long, global = true)]
    glossary: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "pagegloss.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// pagegloss - glossary-driven page localization
///
/// Produces Romanian skeletons (`page_NNNN_ro.html`) next to English book
/// pages using a fixed glossary, remembering finished pages between runs.
#[derive(Parser, Debug)]
#[command(name = "pagegloss")]
#[command(version)]
#[command(about = "Glossary-driven Romanian skeletons for HTML book pages")]
#[command(long_about = "pagegloss walks a directory of page_NNNN.html files, applies fixed structural
replacements and an English to Romanian glossary, and writes page_NNNN_ro.html
next to each page. Progress is kept in a JSON file so reruns skip finished pages.

EXAMPLES:
    pagegloss                                  # Translate ./text with the defaults
    pagegloss -i pages -b 20                   # Other directory, smaller batches
    pagegloss -g glossary.json                 # Use a custom glossary
    pagegloss status                           # Show per-page status
    pagegloss completions bash > pagegloss.bash

CONFIGURATION:
    Configuration is stored in pagegloss.json by default. If the file does not
    exist, a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI color for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (marker, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Accept everything here; the effective level is narrowed with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pagegloss", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Status) => run_status(cli.run),
        Some(Commands::Translate) | None => run_translate(cli.run),
    }
}

// Load the config file and apply command line overrides.
// A missing file is written with defaults only when `create_missing` is set.
fn load_config(options: &RunArgs, create_missing: bool) -> Result<Config> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = if create_missing {
        Config::load_or_create(&options.config_path)?
    } else {
        Config::load_or_default(&options.config_path)?
    };

    if let Some(input_dir) = &options.input_dir {
        config.input_dir = input_dir.clone();
    }
    if let Some(batch_size) = options.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(progress_file) = &options.progress_file {
        config.progress_file = progress_file.clone();
    }
    if let Some(glossary) = &options.glossary {
        config.glossary_file = Some(glossary.clone());
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

fn run_translate(options: RunArgs) -> Result<()> {
    let config = load_config(&options, true)?;
    let controller = Controller::with_config(config)?;

    let summary = controller.run()?;

    info!("Translated: {}/{} pages", summary.recorded_translated, summary.total_pages);
    info!("Failed: {} pages", summary.recorded_failed);
    info!("Success rate: {:.1}%", summary.success_rate());

    Ok(())
}

fn run_status(options: RunArgs) -> Result<()> {
    let config = load_config(&options, false)?;
    let controller = Controller::with_config(config)?;

    let entries = controller.status()?;
    let mut stdout = std::io::stdout().lock();
    for entry in &entries {
        let label = match entry.status {
            PageStatus::Translated => "translated",
            PageStatus::Stale => "stale",
            PageStatus::Failed => "failed",
            PageStatus::Pending => "pending",
        };
        writeln!(stdout, "{:<12} {}", label, entry.file_name)?;
    }

    let done = entries.iter().filter(|e| e.status == PageStatus::Translated).count();
    info!("{}/{} pages translated", done, entries.len());

    Ok(())
}
