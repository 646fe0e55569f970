//! File-backed logging setup.
//!
//! The terminal belongs to the interface while the application runs, so log records never go to
//! stderr. When a log file is requested, records are piped into it through `env_logger`; otherwise
//! no logger is installed and the `log` macros compile down to cheap level checks.

use std::{fs::File, path::Path};

use color_eyre::eyre::Result;
use env_logger::{Builder, Env, Target};
use log::info;

/// Default filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global logger, writing to `path` if one is given.
///
/// # Errors
///
/// This function may return errors if the log file cannot be created or a global logger has
/// already been installed.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    info!("logging to {}", path.display());

    Ok(())
}
