//! Configuration management for the condominium dashboard

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the condominium REST API lives and how to talk to it
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:8000/api/`
    pub base_url: String,
    /// Bearer token forwarded on every backend call
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// PDF export settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory holding the TTF files of `font_family`
    pub font_dir: String,
    pub font_family: String,
    pub title: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Environment variables with prefix CONDO_ and `__` between section and key, e.g.
/// `CONDO_SERVER__PORT` or `CONDO_BACKEND__TIMEOUT_SECS`
fn environment() -> Environment {
    Environment::with_prefix("CONDO")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment())
            .set_override_option("backend.base_url", env::var("BACKEND_URL").ok())?
            .set_override_option("backend.api_token", env::var("BACKEND_TOKEN").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/".to_string(),
            api_token: None,
            timeout_secs: 15,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            font_dir: "./fonts".to_string(),
            font_family: "Roboto".to_string(),
            title: "Registro de visitantes".to_string(),
        }
    }
}
