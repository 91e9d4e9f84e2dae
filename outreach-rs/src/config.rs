//! Configuration for outreach-rs
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `OUTREACH__SECTION__KEY` environment variables.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{OutreachError, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "127.0.0.1:5000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Outgoing message delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Sender address reported by the transport
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// When false, messages are logged to the audit log but not handed to the log transport
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One of "pretty", "compact", "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_from_address() -> String {
    "outreach@localhost".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            from_address: default_from_address(),
            enabled: default_enabled(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| OutreachError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| OutreachError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load layered configuration (defaults, optional file, environment)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
        }

        builder
            .add_source(
                config::Environment::with_prefix("OUTREACH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|settings| settings.try_deserialize::<Config>())
            .map_err(|e| OutreachError::Config(e.to_string()))
    }

    /// Apply command-line overrides on top of the loaded layers
    pub fn apply_overrides(&mut self, listen: Option<String>, log_level: Option<String>) {
        if let Some(listen) = listen {
            self.server.listen_addr = listen;
        }
        if let Some(level) = log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server.listen_addr.parse::<SocketAddr>().map_err(|e| {
            OutreachError::Config(format!(
                "Invalid listen address '{}': {}",
                self.server.listen_addr, e
            ))
        })?;

        if !matches!(self.logging.format.as_str(), "pretty" | "compact" | "json") {
            return Err(OutreachError::Config(format!(
                "Unknown log format: {}",
                self.logging.format
            )));
        }

        if self.delivery.from_address.trim().is_empty() {
            return Err(OutreachError::Config(
                "delivery.from_address must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
