//! Configuration management for the price prediction app

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Environment variable prefix (`MOBILE_PRICE__MODEL__PATH=...`)
pub const ENV_PREFIX: &str = "MOBILE_PRICE";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub logging: LoggingConfig,
    pub about: AboutConfig,
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path of the trained model artifact (.json or .onnx)
    pub path: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_onnx_threads() -> usize {
    1
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
    /// Log file for the interactive app; the terminal belongs to the form
    pub file: String,
}

/// Text shown in the side panel and footer
#[derive(Debug, Clone, Deserialize)]
pub struct AboutConfig {
    pub author: String,
    pub github_url: String,
    pub footer: String,
}

impl AppConfig {
    /// Load configuration from the default file, if present
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path.
    ///
    /// Layers, lowest first: built-in defaults, the file (optional), then
    /// `MOBILE_PRICE__SECTION__KEY` environment variables.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_layered(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX).separator("__")
    }

    fn load_layered<P: AsRef<Path>>(path: P, env: Environment) -> Result<Self> {
        let defaults = AppConfig::default();

        let config = Config::builder()
            .set_default("model.path", defaults.model.path)?
            .set_default("model.onnx_threads", defaults.model.onnx_threads as i64)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("logging.file", defaults.logging.file)?
            .set_default("about.author", defaults.about.author)?
            .set_default("about.github_url", defaults.about.github_url)?
            .set_default("about.footer", defaults.about.footer)?
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(env)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                path: "models/best_model.json".to_string(),
                onnx_threads: default_onnx_threads(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file: "logs/mobile-price.log".to_string(),
            },
            about: AboutConfig {
                author: "Abhishek".to_string(),
                github_url: "https://github.com/AbhishekShelke".to_string(),
                footer: "© 2025 Abhishek | Machine Learning Project".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.model.path, "models/best_model.json");
        assert_eq!(config.model.onnx_threads, 1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_path(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.model.path, "models/best_model.json");
        assert_eq!(config.about.author, "Abhishek");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[model]\npath = \"artifacts/phone.onnx\"\nonnx_threads = 4\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.model.path, "artifacts/phone.onnx");
        assert_eq!(config.model.onnx_threads, 4);
        assert_eq!(config.logging.level, "debug");
        // untouched keys keep their defaults
        assert_eq!(config.logging.format, "pretty");
    }

    fn env_vars(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::environment().source(Some(map))
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[model]\nonnx_threads = 4\n\n[logging]\nlevel = \"debug\"").unwrap();

        let env = env_vars(&[
            ("MOBILE_PRICE__MODEL__ONNX_THREADS", "3"),
            ("MOBILE_PRICE__ABOUT__AUTHOR", "Priya"),
            ("OTHER_APP__MODEL__PATH", "elsewhere.json"),
        ]);
        let config = AppConfig::load_layered(file.path(), env).unwrap();

        assert_eq!(config.model.onnx_threads, 3);
        assert_eq!(config.about.author, "Priya");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.model.path, "models/best_model.json");
    }

    #[test]
    fn test_environment_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_vars(&[("MOBILE_PRICE__MODEL__PATH", "artifacts/phone.onnx")]);

        let config = AppConfig::load_layered(dir.path().join("absent.toml"), env).unwrap();
        assert_eq!(config.model.path, "artifacts/phone.onnx");
        assert_eq!(config.model.onnx_threads, 1);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[model\npath = ").unwrap();

        assert!(AppConfig::load_from_path(file.path()).is_err());
    }
}
