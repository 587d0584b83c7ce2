// Filesystem locations used by forum-stats.
// Resolves the platform cache directory that holds the log file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Name of the log file written while the dashboard owns the terminal.
pub const LOG_FILE_NAME: &str = "forum-stats.log";

/// Get the base cache directory (~/.cache/forum-stats on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "forum-stats").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the log file inside `dir`.
pub fn log_path_in(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_NAME)
}
