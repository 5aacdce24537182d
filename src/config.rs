use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration file looked up when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct Port(pub u16);

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub host: String,
    /// Port of the HTTP server.
    pub port: Port,
    /// Number of HTTP worker threads. Defaults to the number of physical CPUs.
    pub workers: Option<NonZeroUsize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: Port(8080),
            workers: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port.0)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter, in `RUST_LOG` syntax. `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub traces_sample_rate: Option<f32>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sentry: SentryConfig,
}

/// Reads the configuration file. Without an explicit path, a missing
/// `config.yml` in the working directory means built-in defaults.
pub fn read_config(config_file: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let (path, explicit) = match config_file {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    let f = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if !explicit && e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_yaml::from_reader(&f).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
