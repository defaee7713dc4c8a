//! Client configuration loaded from TOML.

use crate::mode::Difficulty;
use crate::pacing::Pacing;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable that overrides [`ClientConfig::server_url`].
pub const SERVER_URL_ENV: &str = "STRICTLY_XO_SERVER_URL";

/// Settings for the terminal client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the resolver service.
    server_url: String,

    /// Request timeout in milliseconds.
    request_timeout_ms: u64,

    /// Delay before showing the bot's reply.
    thinking_delay_ms: u64,

    /// Delay before every other reconciliation.
    settle_delay_ms: u64,

    /// Bot strength preselected on the setup screen.
    difficulty: Difficulty,

    /// Where the terminal client writes its log.
    log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000".to_string(),
            request_timeout_ms: 5000,
            thinking_delay_ms: 1000,
            settle_delay_ms: 50,
            difficulty: Difficulty::Hard,
            log_file: PathBuf::from("strictly_xo.log"),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise defaults, then applies the
    /// [`SERVER_URL_ENV`] override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    #[instrument(skip(path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(SERVER_URL_ENV)
            && !url.trim().is_empty()
        {
            debug!(%url, "Server URL overridden from environment");
            config.server_url = url;
        }
        Ok(config)
    }

    /// Request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Reconciliation pacing.
    pub fn pacing(&self) -> Pacing {
        Pacing::new(
            Duration::from_millis(self.thinking_delay_ms),
            Duration::from_millis(self.settle_delay_ms),
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "thinking_delay_ms = 0\ndifficulty = \"easy\"").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();

        assert_eq!(*config.thinking_delay_ms(), 0);
        assert_eq!(*config.difficulty(), Difficulty::Easy);
        assert_eq!(config.server_url(), "http://127.0.0.1:3000");
        assert_eq!(config.pacing().delay_for(crate::GameMode::HumanVsAutomated, false), Duration::ZERO);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_ms = \"soon\"").unwrap();

        let err = ClientConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn test_setters_chain() {
        let config = ClientConfig::default()
            .with_server_url("http://example.test")
            .with_request_timeout_ms(10u64);
        assert_eq!(config.server_url(), "http://example.test");
        assert_eq!(config.request_timeout(), Duration::from_millis(10));
    }
}
