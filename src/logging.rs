//! Rolling file logs for the desktop shell.
//!
//! Core modules only log through the `log` facade; the backend is started
//! once from `main`. Messages are `event=... module=...` key/value lines and
//! never carry the text a user typed.

use anyhow::{bail, Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::fs;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "stretch-planner";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Start file logging under `log_dir`. Keep the returned handle alive for
/// the life of the process or buffered lines are lost.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle> {
    let level = normalize_level(level)?;

    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory `{}`", log_dir.display()))?;

    let handle = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level `{level}`"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;

    info!(
        "event=app_start module=logging status=ok platform={} version={} level={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level
    );

    Ok(handle)
}

pub fn normalize_level(level: &str) -> Result<&'static str> {
    let normalized = match level.trim().to_ascii_lowercase().as_str() {
        "error" => "error",
        "warn" | "warning" => "warn",
        "info" => "info",
        "debug" => "debug",
        "trace" => "trace",
        other => bail!("unsupported log level `{other}`"),
    };
    Ok(normalized)
}
