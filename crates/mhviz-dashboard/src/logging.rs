#![forbid(unsafe_code)]

//! Log subscriber setup.
//!
//! The terminal belongs to the dashboard while it runs, so logs only go to a
//! file. Without `--log-file` no subscriber is installed and every `tracing`
//! macro is a no-op.
//!
//! The filter comes from `MHVIZ_LOG` (same syntax as `RUST_LOG`) and defaults
//! to `info`.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter directives.
pub const FILTER_ENV: &str = "MHVIZ_LOG";

const DEFAULT_FILTER: &str = "info";

/// Build the filter from [`FILTER_ENV`], falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to `log_file`.
///
/// Returns `Ok(false)` when no file was given or a global subscriber is
/// already installed.
///
/// # Errors
///
/// Returns the I/O error if the log file cannot be opened.
pub fn init(log_file: Option<&Path>) -> io::Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };
    let file = open(path)?;
    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);
    let installed = tracing_subscriber::registry()
        .with(layer)
        .with(env_filter())
        .try_init()
        .is_ok();
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_means_no_subscriber() {
        assert!(!init(None).expect("nothing to open"));
    }

    #[test]
    fn unopenable_file_is_an_error() {
        let dir = std::env::temp_dir();
        // A directory cannot be opened for appending.
        assert!(init(Some(&dir)).is_err());
    }
}
