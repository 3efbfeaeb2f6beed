use crate::config::ClientConfig;
use crate::core::ConfigProvider;
use crate::utils::error::{HayyaError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// On-disk configuration, e.g. `hayya.toml`:
///
/// ```toml
/// [backend]
/// base_url = "${HAYYA_BACKEND}"
/// timeout_seconds = 10
///
/// [logging]
/// verbose = true
/// json = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub backend: BackendConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HayyaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HayyaError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HayyaError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.backend
            .timeout_seconds
            .unwrap_or(crate::config::DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend.base_url.clone(),
            timeout_seconds: self.timeout_seconds(),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.backend.base_url
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.client_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[backend]
base_url = "https://hayya.example.com"
timeout_seconds = 5

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "https://hayya.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_defaults_when_omitted() {
        let config = TomlConfig::from_toml_str("[backend]\nbase_url = \"http://localhost:8000\"\n").unwrap();
        assert_eq!(config.timeout_seconds(), crate::config::DEFAULT_TIMEOUT_SECONDS);
        assert!(config.logging.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HAYYA_TEST_BACKEND", "http://10.0.0.7:8000");

        let toml_content = r#"
[backend]
base_url = "${HAYYA_TEST_BACKEND}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.7:8000");

        std::env::remove_var("HAYYA_TEST_BACKEND");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[backend]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_backend_section_is_config_error() {
        let err = TomlConfig::from_toml_str("[logging]\nverbose = true\n").unwrap_err();
        assert!(matches!(err, HayyaError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[backend]\nbase_url = \"http://127.0.0.1:9000\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.client_config().base_url, "http://127.0.0.1:9000");
    }
}
