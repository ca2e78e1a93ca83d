#![forbid(unsafe_code)]

//! Synchronization settings.
//!
//! [`SyncConfig`] carries the quiescence window and the blur policy. Values
//! come from code (builder), from the environment, or (with the
//! `policy-config` feature) from TOML/JSON policy documents.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `FORMBIND_DEBOUNCE_MS` | quiescence window in milliseconds | `250` |
//! | `FORMBIND_FLUSH_ON_BLUR` | commit immediately on blur | `true` |

use std::env;

use formbind_core::DEFAULT_DEBOUNCE;
use web_time::Duration;

/// Environment variable holding the quiescence window in milliseconds.
pub const DEBOUNCE_ENV: &str = "FORMBIND_DEBOUNCE_MS";
/// Environment variable toggling flush-on-blur.
pub const FLUSH_ON_BLUR_ENV: &str = "FORMBIND_FLUSH_ON_BLUR";

/// Errors from configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The debounce value is not a whole number of milliseconds.
    InvalidDebounce(String),
    /// A boolean setting had an unrecognized spelling.
    InvalidFlag { key: &'static str, value: String },
    /// A policy document could not be parsed.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDebounce(value) => {
                write!(f, "invalid debounce window {value:?}: expected milliseconds")
            }
            Self::InvalidFlag { key, value } => {
                write!(f, "invalid value {value:?} for {key}: expected true or false")
            }
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Field synchronization settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncConfig {
    /// Idle time after the last edit before the buffer may commit.
    pub debounce: Duration,
    /// Commit immediately when the input loses focus.
    pub flush_on_blur: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            flush_on_blur: true,
        }
    }
}

impl SyncConfig {
    /// Default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quiescence window.
    #[must_use]
    pub fn debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Set the quiescence window in milliseconds.
    #[must_use]
    pub fn debounce_ms(self, ms: u64) -> Self {
        self.debounce(Duration::from_millis(ms))
    }

    /// Enable or disable flush-on-blur.
    #[must_use]
    pub fn flush_on_blur(mut self, enabled: bool) -> Self {
        self.flush_on_blur = enabled;
        self
    }

    /// Load from `FORMBIND_DEBOUNCE_MS` / `FORMBIND_FLUSH_ON_BLUR`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let debounce = env::var(DEBOUNCE_ENV).ok();
        let flush = env::var(FLUSH_ON_BLUR_ENV).ok();
        Self::from_env_values(debounce.as_deref(), flush.as_deref())
    }

    /// Build from raw environment values (testable without touching the
    /// process environment).
    pub fn from_env_values(
        debounce_ms: Option<&str>,
        flush_on_blur: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = debounce_ms.map(str::trim).filter(|s| !s.is_empty()) {
            let ms = raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDebounce(raw.to_string()))?;
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(raw) = flush_on_blur.map(str::trim).filter(|s| !s.is_empty()) {
            config.flush_on_blur = parse_flag(FLUSH_ON_BLUR_ENV, raw)?;
        }
        tracing::debug!(
            debounce_ms = u64::try_from(config.debounce.as_millis()).unwrap_or(u64::MAX),
            flush_on_blur = config.flush_on_blur,
            "sync config loaded"
        );
        Ok(config)
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(feature = "policy-config")]
mod policy {
    use super::{ConfigError, SyncConfig};
    use web_time::Duration;

    #[derive(serde::Deserialize, Default)]
    #[serde(default, deny_unknown_fields)]
    struct PolicyFile {
        debounce_ms: Option<u64>,
        flush_on_blur: Option<bool>,
    }

    impl PolicyFile {
        fn apply(self) -> SyncConfig {
            let mut config = SyncConfig::default();
            if let Some(ms) = self.debounce_ms {
                config.debounce = Duration::from_millis(ms);
            }
            if let Some(flush) = self.flush_on_blur {
                config.flush_on_blur = flush;
            }
            config
        }
    }

    impl SyncConfig {
        /// Parse a TOML policy document (`debounce_ms`, `flush_on_blur`).
        pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
            toml::from_str::<PolicyFile>(source)
                .map(PolicyFile::apply)
                .map_err(|e| ConfigError::Parse(e.to_string()))
        }

        /// Parse a JSON policy document (`debounce_ms`, `flush_on_blur`).
        pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
            serde_json::from_str::<PolicyFile>(source)
                .map(PolicyFile::apply)
                .map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }
}
