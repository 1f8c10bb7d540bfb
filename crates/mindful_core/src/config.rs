use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("missing required config option `{0}`")]
    Missing(&'static str),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ============================================================================
// Session config
// ============================================================================

/// How the delay between completion attempts grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backoff {
    #[default]
    Fixed,
    Exponential,
}

/// Immutable per-session configuration.
///
/// Every option is a flat top-level TOML key. Unknown keys are ignored;
/// `model` and `api_url` have no defaults and must be provided by the file,
/// the environment, or the command line before [`SessionConfig::validate`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub model: String,
    pub api_url: String,
    pub timeout_seconds: f64,
    /// Total attempts per completion, including the first.
    pub max_retries: u32,
    pub preferred_voice: String,
    /// Words per minute handed to the speech engine.
    pub speech_rate: u32,
    pub max_history: usize,
    pub clear_on_exit: bool,

    pub temperature: f32,
    /// How many prior turns are rendered into each prompt.
    pub context_turns: usize,
    pub retry_delay_seconds: f64,
    pub max_retry_delay_seconds: f64,
    pub backoff: Backoff,
    pub log_path: Option<PathBuf>,
    pub listen_timeout_seconds: f64,
    pub phrase_time_limit_seconds: f64,
    pub tts_command: String,
    pub stt_command: Option<String>,
    pub lexicon_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            api_url: String::new(),
            timeout_seconds: 30.0,
            max_retries: 3,
            preferred_voice: "zira".to_string(),
            speech_rate: 150,
            max_history: 20,
            clear_on_exit: false,
            temperature: 0.7,
            context_turns: 4,
            retry_delay_seconds: 1.0,
            max_retry_delay_seconds: 30.0,
            backoff: Backoff::Fixed,
            log_path: None,
            listen_timeout_seconds: 5.0,
            phrase_time_limit_seconds: 10.0,
            tts_command: "espeak".to_string(),
            stt_command: None,
            lexicon_path: None,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file and apply env var overrides.
    /// The result is not validated yet.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Like [`SessionConfig::load`], but a missing file yields defaults.
    /// A file that exists and fails to parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::info!(
                    "Config file {} not found, using defaults",
                    path.as_ref().display()
                );
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                Ok(cfg)
            }
            other => other,
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("MINDFUL_MODEL") {
            self.model = v;
        }
        if let Some(v) = lookup("MINDFUL_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = lookup("MINDFUL_TIMEOUT_SECONDS") {
            match v.parse() {
                Ok(n) => self.timeout_seconds = n,
                Err(_) => tracing::warn!("Ignoring unparsable MINDFUL_TIMEOUT_SECONDS={}", v),
            }
        }
        if let Some(v) = lookup("MINDFUL_MAX_RETRIES") {
            match v.parse() {
                Ok(n) => self.max_retries = n,
                Err(_) => tracing::warn!("Ignoring unparsable MINDFUL_MAX_RETRIES={}", v),
            }
        }
        if let Some(v) = lookup("MINDFUL_MAX_HISTORY") {
            match v.parse() {
                Ok(n) => self.max_history = n,
                Err(_) => tracing::warn!("Ignoring unparsable MINDFUL_MAX_HISTORY={}", v),
            }
        }
    }

    /// Check required fields and value ranges. Run once at startup; a failure
    /// here means the session never begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Missing("model"));
        }
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Missing("api_url"));
        }
        if !(self.timeout_seconds.is_finite() && self.timeout_seconds > 0.0) {
            return Err(invalid("timeout_seconds", "must be a positive number"));
        }
        if self.max_retries == 0 {
            return Err(invalid("max_retries", "at least one attempt is required"));
        }
        if self.max_history == 0 {
            return Err(invalid("max_history", "must be greater than zero"));
        }
        for (field, secs) in [
            ("retry_delay_seconds", self.retry_delay_seconds),
            ("max_retry_delay_seconds", self.max_retry_delay_seconds),
            ("listen_timeout_seconds", self.listen_timeout_seconds),
            ("phrase_time_limit_seconds", self.phrase_time_limit_seconds),
        ] {
            if !(secs.is_finite() && secs >= 0.0) {
                return Err(invalid(field, "must be a non-negative number"));
            }
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(invalid("temperature", "must be within 0.0..=2.0"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        secs(self.timeout_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        secs(self.retry_delay_seconds)
    }

    pub fn max_retry_delay(&self) -> Duration {
        secs(self.max_retry_delay_seconds)
    }

    pub fn listen_timeout(&self) -> Duration {
        secs(self.listen_timeout_seconds)
    }

    pub fn phrase_time_limit(&self) -> Duration {
        secs(self.phrase_time_limit_seconds)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
