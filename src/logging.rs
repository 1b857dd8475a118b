//! Tracing subscriber setup

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines go
pub enum LogTarget {
    /// Append to the configured log file (the terminal belongs to the form)
    File,
    Stderr,
}

fn env_filter(level: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive(format!("mobile_price_predictor={}", level).parse()?)
        .add_directive(format!("score_specs={}", level).parse()?)
        .add_directive(format!("mobile_price={}", level).parse()?))
}

/// Install the global subscriber. `RUST_LOG` directives still apply.
pub fn init(config: &LoggingConfig, target: LogTarget) -> Result<()> {
    let filter = env_filter(&config.level)?;
    let json = config.format.eq_ignore_ascii_case("json");

    match target {
        LogTarget::File => {
            let path = Path::new(&config.file);
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            if json {
                builder.json().init();
            } else {
                builder.init();
            }
        }
        LogTarget::Stderr => {
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr);
            if json {
                builder.json().init();
            } else {
                builder.init();
            }
        }
    }

    Ok(())
}
