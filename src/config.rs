//! Application configuration loading and validation.
//!
//! Configuration is loaded from an optional TOML file with environment
//! variable overrides for endpoint locations (`DOCKER_HOST`). Every endpoint
//! template lives here as an explicit value handed to the component that
//! needs it; nothing reads these through process-wide globals, so two
//! orchestrators with different regions can coexist in one process.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub builder: BuilderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Container registry settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Registry host used when synthesizing a destination image URI
    /// (`<host>/<project>/<display_name>`).
    #[serde(default = "default_registry_host")]
    pub host: String,

    /// Docker engine API endpoint used for pushing images. Overridden by
    /// the `DOCKER_HOST` environment variable when set.
    #[serde(default = "default_docker_host")]
    pub docker_host: String,
}

fn default_registry_host() -> String {
    "gcr.io".into()
}

fn default_docker_host() -> String {
    "http://127.0.0.1:2375".into()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: default_registry_host(),
            docker_host: default_docker_host(),
        }
    }
}

/// Vertex AI platform settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    /// API host suffix; the regional endpoint is `<location>-<api_host>`.
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Region used when a request doesn't specify one.
    #[serde(default = "default_location")]
    pub default_location: String,

    /// Interval between operation status polls during a synchronous wait.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_api_host() -> String {
    "aiplatform.googleapis.com".into()
}

fn default_location() -> String {
    "us-central1".into()
}

const fn default_poll_interval_secs() -> u64 {
    5
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            default_location: default_location(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

/// Packaging backend settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BuilderConfig {
    /// Program invoked to build a serving image from a model artifact.
    #[serde(default = "default_builder_program")]
    pub program: String,
}

fn default_builder_program() -> String {
    "modelpack".into()
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            program: default_builder_program(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
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
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        if let Ok(docker_host) = std::env::var("DOCKER_HOST") {
            config.registry.docker_host = docker_host;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load the file at `path` if it exists, otherwise fall back to defaults.
    ///
    /// The config file is optional for this tool; every field has a usable
    /// default.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let mut config = Self::default();
            if let Ok(docker_host) = std::env::var("DOCKER_HOST") {
                config.registry.docker_host = docker_host;
            }
            Ok(config)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.registry.host.is_empty() {
            return Err(ConfigError::MissingField {
                field: "registry.host",
            }
            .into());
        }
        if self.platform.api_host.is_empty() {
            return Err(ConfigError::MissingField {
                field: "platform.api_host",
            }
            .into());
        }
        if self.platform.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "platform.poll_interval_secs",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config = Config::default();
        assert_eq!(config.registry.host, "gcr.io");
        assert_eq!(config.platform.api_host, "aiplatform.googleapis.com");
        assert_eq!(config.platform.default_location, "us-central1");
        assert_eq!(config.builder.program, "modelpack");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let toml = "[platform]\npoll_interval_secs = 0\n";
        let config: Config = toml::from_str(toml).expect("parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_file() {
        let toml = "[registry]\nhost = \"us-docker.pkg.dev\"\n";
        let config: Config = toml::from_str(toml).expect("parse");
        assert_eq!(config.registry.host, "us-docker.pkg.dev");
        assert_eq!(config.platform.default_location, "us-central1");
    }
}
