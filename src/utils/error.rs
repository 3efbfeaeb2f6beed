use thiserror::Error;

/// Fallback shown when the backend rejects a prediction without a usable `detail`.
pub const GENERIC_PREDICTION_FAILURE: &str = "Prediction failed. Please try again.";

#[derive(Error, Debug)]
pub enum HayyaError {
    #[error("Please enter at least one past period start date.")]
    EmptyInput,

    #[error(
        "Invalid date format detected:\n{}\n\nPlease use YYYY-MM-DD format.",
        .entries.join(", ")
    )]
    InvalidDateFormat { entries: Vec<String> },

    #[error("Server rejected the request ({status}): {}", .detail.as_deref().unwrap_or(GENERIC_PREDICTION_FAILURE))]
    ServerRejected { status: u16, detail: Option<String> },

    #[error("Could not reach backend at {base_url}: {source}")]
    Transport {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed response from backend: {message}")]
    MalformedResponse { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Server,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HayyaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HayyaError::EmptyInput | HayyaError::InvalidDateFormat { .. } => ErrorCategory::Input,
            HayyaError::ServerRejected { .. } | HayyaError::MalformedResponse { .. } => {
                ErrorCategory::Server
            }
            HayyaError::Transport { .. } => ErrorCategory::Network,
            HayyaError::ConfigError { .. } | HayyaError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            HayyaError::IoError(_) | HayyaError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Server | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// The single message shown to the user at the submission boundary.
    pub fn user_friendly_message(&self) -> String {
        match self {
            HayyaError::EmptyInput | HayyaError::InvalidDateFormat { .. } => self.to_string(),
            HayyaError::ServerRejected { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| GENERIC_PREDICTION_FAILURE.to_string()),
            HayyaError::Transport { base_url, .. } => format!(
                "Unable to connect to the server. Please ensure the backend is running on {}",
                base_url
            ),
            HayyaError::MalformedResponse { .. } => {
                "The server sent a response that could not be understood.".to_string()
            }
            HayyaError::ConfigError { message } => format!("Configuration problem: {}", message),
            HayyaError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            HayyaError::IoError(e) => format!("File access failed: {}", e),
            HayyaError::SerializationError(e) => format!("Could not encode data: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Please check your input and try again.",
            ErrorCategory::Server => "The backend rejected or garbled the request; resubmit or check the server logs.",
            ErrorCategory::Network => "Start the backend or pass the right address with --base-url.",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags.",
            ErrorCategory::System => "Check file permissions and available disk space.",
        }
    }
}

pub type Result<T> = std::result::Result<T, HayyaError>;
