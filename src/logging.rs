//! Logging
//!
//! The TUI owns stdout, so logs only ever go to files: a daily rolling
//! file under the log directory in debug mode, or a single configured file.

use crate::config::LoggingConfig;
use crate::error::{GameCreatorError, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "game-creator.log";

/// Logging setup options
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub debug_mode: bool,
    pub log_dir: PathBuf,
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            debug_mode: false,
            log_dir: default_log_dir(),
            level: "info".to_string(),
            file: None,
        }
    }

    pub fn with_debug_mode(mut self, debug: bool) -> Self {
        self.debug_mode = debug;
        self
    }

    pub fn with_log_dir(mut self, dir: PathBuf) -> Self {
        self.log_dir = dir;
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.file = file;
        self
    }

    /// Filter directive: `RUST_LOG` wins, debug mode forces at least debug
    fn filter(&self) -> EnvFilter {
        let level = if self.debug_mode && !matches!(self.level.as_str(), "trace" | "debug") {
            "debug"
        } else {
            self.level.as_str()
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self::new()
            .with_level(config.level.clone())
            .with_file(config.file.clone())
    }
}

/// Default log directory: ./.game-creator/logs
pub fn default_log_dir() -> PathBuf {
    PathBuf::from(".game-creator").join("logs")
}

/// Install the global subscriber.
///
/// Returns the writer guard, which must be held for the lifetime of the
/// program, or `None` when logging is disabled.
pub fn init_logging(config: LogConfig) -> Result<Option<WorkerGuard>> {
    let appender = if config.debug_mode {
        std::fs::create_dir_all(&config.log_dir)?;
        tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX)
    } else if let Some(file) = &config.file {
        let dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = file
            .file_name()
            .ok_or_else(|| GameCreatorError::Logging(format!("not a file path: {:?}", file)))?;
        std::fs::create_dir_all(dir)?;
        tracing_appender::rolling::never(dir, name)
    } else {
        return Ok(None);
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(config.filter())
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| GameCreatorError::Logging(e.to_string()))?;

    tracing::debug!("Logging initialized (debug_mode={})", config.debug_mode);
    Ok(Some(guard))
}

/// Remove `game-creator.log*` files older than `max_age_days` from `dir`
pub fn cleanup_old_logs(dir: &Path, max_age_days: u64) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let max_age = Duration::from_secs(max_age_days.saturating_mul(24 * 60 * 60));
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in std::fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX));
        if !is_log || !path.is_file() {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        let age = now.duration_since(modified).unwrap_or_default();
        if age > max_age {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }

    Ok(removed)
}

/// Log files in `dir`, newest last
pub fn list_log_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX))
        })
        .collect();
    files.sort();
    Ok(files)
}
