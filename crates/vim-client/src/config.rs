//! Connection configuration
//!
//! Defaults, then an optional TOML file, then `DVSNIC_*` environment
//! variables. Command-line flags are applied on top by the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Searched in order when no file is given explicitly
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["/etc/dvsnic/dvsnic.toml", "./dvsnic.toml"];

/// Prefix of the environment overrides, e.g. `DVSNIC_HOST`
pub const ENV_PREFIX: &str = "DVSNIC";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VimConfig {
    /// Management endpoint host name or address
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub scheme: String,
    /// Accept any TLS certificate
    pub insecure: bool,
    /// API release segment of the JSON API path
    pub api_release: String,
    pub request_timeout_secs: u64,
    pub task_poll_interval_ms: u64,
    /// Overall limit for a task wait; unbounded when unset
    pub task_timeout_secs: Option<u64>,
}

impl Default for VimConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 443,
            user: String::new(),
            password: None,
            scheme: "https".to_string(),
            insecure: false,
            api_release: "8.0.1.0".to_string(),
            request_timeout_secs: 60,
            task_poll_interval_ms: 1000,
            task_timeout_secs: None,
        }
    }
}

impl VimConfig {
    /// Load configuration from `path`, or from the first default location
    /// that exists, with environment overrides applied
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => DEFAULT_CONFIG_PATHS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists()),
        };

        let mut builder = config::Config::builder();
        if let Some(file) = file {
            log::debug!("Loading configuration from {}", file.display());
            builder = builder.add_source(config::File::from(file).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: VimConfig = settings.try_deserialize()?;
        Ok(config)
    }

    /// Check the values a connection cannot do without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host is required".to_string()));
        }
        if self.user.trim().is_empty() {
            return Err(ConfigError::Invalid("user is required".to_string()));
        }
        if self.task_poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "task_poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.scheme != "https" && self.scheme != "http" {
            return Err(ConfigError::Invalid(format!(
                "unsupported scheme '{}'",
                self.scheme
            )));
        }
        Ok(())
    }

    /// Root of the JSON API, e.g. `https://vc01:443/sdk/vim25/8.0.1.0`
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/sdk/vim25/{}",
            self.scheme, self.host, self.port, self.api_release
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn task_poll_interval(&self) -> Duration {
        Duration::from_millis(self.task_poll_interval_ms)
    }

    pub fn task_timeout(&self) -> Option<Duration> {
        self.task_timeout_secs.map(Duration::from_secs)
    }
}
