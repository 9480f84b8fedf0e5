//! Configuration loading and management
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! logging:
//!   filter: info,customers=debug
//! seed:
//!   - name: Rajesh Kumar
//!     email: rajesh@example.com
//!     phone: "+91 98200 00001"
//!     address:
//!       street: 12 Marine Drive
//!       city: Mumbai
//!       state: Maharashtra
//!       zipCode: "400020"
//!       country: India
//! ```
//!
//! Every section is optional; missing values fall back to [`Default`].

use crate::service::CustomerRequest;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "CUSTOMERS_CONFIG";

/// Listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Log filter used when `RUST_LOG` is not set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Complete configuration of the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,

    /// Customers created at startup
    pub seed: Vec<CustomerRequest>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from an explicit path, else from `CUSTOMERS_CONFIG`, else defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_ENV).ok())
        {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
