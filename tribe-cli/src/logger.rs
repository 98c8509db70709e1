//! Logging setup
//!
//! Console output goes to stderr so command output on stdout stays
//! clean. With a log directory, a daily-rotating plain-text file is
//! written as well.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing
///
/// # Arguments
/// * `level` - default filter when `RUST_LOG` is unset (e.g. "warn", "tribe_client=debug")
/// * `json_format` - JSON console output instead of the human format
/// * `log_dir` - optional directory for `tribe.YYYY-MM-DD` log files
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "tribe");
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(appender)),
            )
        }
        None => None,
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}
