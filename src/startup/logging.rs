//! File-backed `tracing` setup.
//!
//! The terminal belongs to the UI, so logs go to
//! `~/.mathtutor/mathtutor.log` (or the temp dir when there is no home).

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_DIR: &str = ".mathtutor";
const LOG_FILE: &str = "mathtutor.log";

/// Directory that holds the log file.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_DIR)
}

/// Open (append) the log file under `dir`, creating the directory.
pub fn open_log_file(dir: &Path) -> std::io::Result<(fs::File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Install the global subscriber.
///
/// Returns the log path on success. Failure is reported, not fatal: the app
/// runs without logs.
pub fn init_logging(filter: &str) -> Option<PathBuf> {
    let (file, path) = match open_log_file(&log_dir()) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("mathtutor: logging disabled: {}", e);
            return None;
        }
    };

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(super::config::DEFAULT_LOG_FILTER));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();

    match result {
        Ok(()) => Some(path),
        Err(e) => {
            eprintln!("mathtutor: logging disabled: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join(LOG_DIR);

        let (_file, path) = open_log_file(&dir).unwrap();
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), LOG_FILE);
    }

    #[test]
    fn test_log_dir_ends_with_app_dir() {
        assert!(log_dir().ends_with(LOG_DIR));
    }
}
