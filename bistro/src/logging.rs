//! File logging
//!
//! The terminal belongs to the UI, so tracing output goes to a file through
//! a non-blocking writer. Keep the returned guard alive until exit or the
//! last lines are lost.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber; does nothing without a log file
///
/// Fails when the log directory cannot be created or the file cannot be
/// opened.
pub fn init(log_file: Option<&Path>, level: &str) -> Result<Option<WorkerGuard>, InitError> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bistro.log".to_string());

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber installed earlier (tests, embedding) wins
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .try_init();

    Ok(Some(guard))
}
