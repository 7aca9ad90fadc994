use anyhow::{anyhow, Context, Result};
use log::{debug, warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory holding `page_NNNN.html` files
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// JSON file recording translated and failed pages
    #[serde(default = "default_progress_file")]
    pub progress_file: PathBuf,

    /// Pages processed between progress checkpoints
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Page count shown in localized headers
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,

    /// Optional JSON glossary replacing the built-in one
    #[serde(default)]
    pub glossary_file: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("text")
}

fn default_progress_file() -> PathBuf {
    PathBuf::from("translation_progress.json")
}

fn default_batch_size() -> usize {
    50
}

fn default_total_pages() -> u32 {
    457
}

impl Config {
    /// Load the configuration from `path`, writing defaults there first if
    /// the file does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            return Self::read_from(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Load the configuration from `path`, falling back to defaults without
    /// touching the filesystem when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            return Self::read_from(path);
        }

        debug!("Config file not found at {:?}, using defaults.", path);
        Ok(Config::default())
    }

    fn read_from(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(anyhow!("Batch size must be at least 1"));
        }

        if self.total_pages == 0 {
            return Err(anyhow!("Total page count must be at least 1"));
        }

        if self.progress_file.as_os_str().is_empty() {
            return Err(anyhow!("Progress file path must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: default_input_dir(),
            progress_file: default_progress_file(),
            batch_size: default_batch_size(),
            total_pages: default_total_pages(),
            glossary_file: None,
            log_level: LogLevel::default(),
        }
    }
}
