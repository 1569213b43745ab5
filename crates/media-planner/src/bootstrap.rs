use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use planner_core::settings::{app_dir, app_dir_in};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name of the TUI log inside `~/.media-planner/logs/`.
pub const LOG_FILE_NAME: &str = "media-planner.log";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.media-planner/` and `~/.media-planner/logs/` exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    ensure_directories_in(&home)
}

pub fn ensure_directories_in(home: &Path) -> anyhow::Result<()> {
    let planner_dir = app_dir_in(home);
    std::fs::create_dir_all(&planner_dir)?;
    std::fs::create_dir_all(planner_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to an [`EnvFilter`] directive.
///
/// Unknown names pass through unchanged so that full directives such as
/// `planner_data=debug` keep working.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// `--log-file`, or `~/.media-planner/logs/media-planner.log`.
pub fn log_file_path(log_file: Option<&PathBuf>) -> PathBuf {
    log_file
        .cloned()
        .unwrap_or_else(|| app_dir().join("logs").join(LOG_FILE_NAME))
}

/// Initialise the global `tracing` subscriber.
///
/// Full-screen views log to a file so output does not tear the terminal;
/// the line-oriented views log to stderr. An unrecognised level falls back
/// to `"info"`.
pub fn setup_logging(
    log_level: &str,
    log_file: Option<&PathBuf>,
    to_file: bool,
) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = if to_file || log_file.is_some() {
        let path = log_file_path(log_file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Some(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
    } else {
        None
    };

    let stderr_layer = (!to_file).then(|| {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories_in() {
        let tmp = TempDir::new().expect("tempdir");

        ensure_directories_in(tmp.path()).expect("ensure_directories_in should succeed");

        let planner_dir = tmp.path().join(".media-planner");
        assert!(planner_dir.is_dir(), ".media-planner dir must exist");
        assert!(planner_dir.join("logs").is_dir(), "logs subdir must exist");

        // Running twice is fine.
        ensure_directories_in(tmp.path()).expect("second run should succeed");
    }

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive("planner_data=trace"), "planner_data=trace");
    }

    #[test]
    fn test_log_file_path_prefers_explicit() {
        let explicit = PathBuf::from("/tmp/planner-test.log");
        assert_eq!(log_file_path(Some(&explicit)), explicit);

        let default = log_file_path(None);
        assert!(default.ends_with(Path::new(".media-planner/logs/media-planner.log")));
    }
}
