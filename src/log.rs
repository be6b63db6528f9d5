//! Diagnostic logging.
//!
//! Since the terminal is occupied by the editor, log output is only ever written to
//! a file, and only if one is requested. Filtering follows the `RUST_LOG`
//! environment variable, defaulting to `info`.

use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a subscriber that appends log records to the file at `path`.
pub fn init(path: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).init();
    Ok(())
}
