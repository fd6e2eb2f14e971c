use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Map a user supplied level name onto an `EnvFilter` directive.
///
/// Unknown names fall back to `warn`, which keeps the terminal chart quiet.
pub fn filter_directive(log_level: &str) -> &'static str {
    match log_level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" => "error",
        "off" => "off",
        _ => "warn",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, events are appended to that file without ANSI colors;
/// otherwise they go to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::new(filter_directive(log_level));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }

    Ok(())
}
