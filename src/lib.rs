pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::terminal::TerminalRenderer;
pub use config::{toml_config::TomlConfig, ClientConfig};
pub use crate::core::{
    chat::ChatSession, client::BackendClient, display::format_result_for_display,
    input::parse_input, predictor::Predictor,
};
pub use domain::model::{DisplayModel, PredictionResult, RequestOutcome, ValidatedRequest};
pub use utils::error::{HayyaError, Result};
