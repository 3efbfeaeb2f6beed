use crate::config::toml_config::TomlConfig;
use crate::config::ClientConfig;
use crate::core::input::SAMPLE_DATES;
use crate::utils::error::{HayyaError, Result};
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "hayya")]
#[command(about = "Command-line client for the Hayya.AI cycle predictor and chat assistant")]
pub struct CliConfig {
    /// Backend address, overrides the config file
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds, overrides the config file
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Predict the next period start from past start dates
    Predict(PredictArgs),
    /// Send one or more messages to the assistant
    Chat(ChatArgs),
    /// Print the assistant's welcome message
    Greet,
    /// Check that the backend is up
    Health,
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    /// Past start dates (YYYY-MM-DD), separated by commas or newlines
    #[arg(long, conflicts_with_all = ["dates_file", "sample"])]
    pub dates: Option<String>,

    /// Read past start dates from a file
    #[arg(long, conflicts_with = "sample")]
    pub dates_file: Option<PathBuf>,

    /// Use a built-in set of five monthly dates
    #[arg(long)]
    pub sample: bool,

    /// Number of recent cycles to average over
    #[arg(long)]
    pub lookback: Option<String>,

    /// Print the rendered result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ChatArgs {
    /// Message to send; repeat for a multi-turn conversation
    #[arg(short, long, required = true)]
    pub message: Vec<String>,

    /// Skip fetching the welcome message
    #[arg(long)]
    pub no_greeting: bool,
}

impl PredictArgs {
    /// Raw date text exactly as a form field would hold it. No source yields an empty string.
    pub fn raw_dates(&self) -> Result<String> {
        if let Some(dates) = &self.dates {
            return Ok(dates.clone());
        }
        if let Some(path) = &self.dates_file {
            tracing::debug!("Reading dates from {}", path.display());
            return std::fs::read_to_string(path).map_err(HayyaError::IoError);
        }
        if self.sample {
            tracing::info!("✅ Sample data loaded");
            return Ok(SAMPLE_DATES.to_string());
        }
        Ok(String::new())
    }

    pub fn raw_lookback(&self) -> &str {
        self.lookback.as_deref().unwrap_or("")
    }
}

impl CliConfig {
    fn file_config(&self) -> Result<Option<TomlConfig>> {
        self.config
            .as_ref()
            .map(|path| {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)
            })
            .transpose()
    }

    /// Flags win over the config file, which wins over built-in defaults.
    pub fn resolve(&self) -> Result<ClientConfig> {
        let mut config = self
            .file_config()?
            .map(|file| file.client_config())
            .unwrap_or_default();

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }

        config.validate()?;
        Ok(config)
    }

    /// Logging switches, taking the config file into account when it sets them.
    pub fn logging(&self) -> (bool, bool) {
        let file = self.file_config().ok().flatten();
        let verbose = self.verbose || file.as_ref().is_some_and(|f| f.verbose());
        let json = self.json_logs || file.as_ref().is_some_and(|f| f.json_logs());
        (verbose, json)
    }
}
