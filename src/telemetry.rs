// Logging setup.
// The dashboard owns the terminal, so events go to a log file in the cache directory.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cache::paths::log_path_in;
use crate::error::Result;

/// Open (creating if needed) the append-only log file under `dir`.
pub fn open_log_file(dir: &Path) -> Result<File> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path_in(dir))?;
    Ok(file)
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info` level.
/// Without a directory, events are discarded.
pub fn init(dir: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match dir {
        Some(dir) => {
            let file = open_log_file(dir)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .compact()
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::sink))
                .init();
        }
    }
    Ok(())
}
