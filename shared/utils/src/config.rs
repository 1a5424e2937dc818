use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::SpecMatchResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub uploads: UploadConfig,
    pub logging: LoggingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size: usize,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Parent directory for per-request scratch space; system temp dir when unset
    pub scratch_root: Option<PathBuf>,
    pub default_project_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub metrics_enabled: bool,
    pub prometheus_namespace: String,
}

impl AppConfig {
    pub fn load() -> SpecMatchResult<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::load_from(Path::new("config"))
    }

    /// Layers `default`, `{ENVIRONMENT}` and `local` files from `config_dir`,
    /// then `SPECMATCH__*` environment variables.
    pub fn load_from(config_dir: &Path) -> SpecMatchResult<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let layer = |name: &str| {
            File::with_name(&config_dir.join(name).to_string_lossy()).required(false)
        };

        let config = Config::builder()
            // Start with default values
            .add_source(layer("default"))
            // Add environment-specific config
            .add_source(layer(&environment))
            // Add local config (gitignored)
            .add_source(layer("local"))
            // Add environment variables with SPECMATCH prefix
            .add_source(Environment::with_prefix("SPECMATCH").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                max_request_size: 16 * 1024 * 1024, // 16MB
                timeout_seconds: 120,
            },
            uploads: UploadConfig {
                scratch_root: None,
                default_project_name: "Untitled Project".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file_path: None,
            },
            monitoring: MonitoringConfig {
                metrics_enabled: true,
                prometheus_namespace: "specmatch".to_string(),
            },
        }
    }
}
