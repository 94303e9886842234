//! Logging Infrastructure
//!
//! Structured logging setup for development and production:
//! - Pretty console output in development, JSON in production
//! - Daily rotating `app.YYYY-MM-DD.log` files when a log directory is given
//! - Log files older than 14 days are deleted by an hourly task

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Days an application log file is kept
const LOG_RETENTION_DAYS: i64 = 14;

/// Date of an `app.YYYY-MM-DD.log` (or `app-YYYY-MM-DD.log`) file name
fn log_file_date(name: &str) -> Option<NaiveDate> {
    let date = name.strip_prefix("app")?.strip_suffix(".log")?;
    let date = date.strip_prefix(['-', '.']).unwrap_or(date);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Delete application log files older than the retention window
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    let cutoff = Local::now().date_naive() - chrono::Duration::days(LOG_RETENTION_DAYS);

    if !log_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(date) = log_file_date(name)
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(())
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - default filter (e.g. "info"); `RUST_LOG` overrides it
/// * `json_format` - JSON lines instead of the pretty format
/// * `log_dir` - also write daily rotating files into this directory
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// kiosk_server::init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + file)
/// kiosk_server::init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)?;

            let app_log = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("app")
                .filename_suffix("log")
                .build(log_dir)?;
            let layer = if json_format {
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(std::sync::Mutex::new(app_log))
                    .boxed()
            } else {
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(app_log))
                    .boxed()
            };

            tokio::spawn(periodic_cleanup(log_dir.to_path_buf()));
            Some(layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Initialize console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Hourly cleanup of old log files
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
        sleep(Duration::from_secs(3600)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_date() {
        assert_eq!(
            log_file_date("app.2024-12-24.log"),
            NaiveDate::from_ymd_opt(2024, 12, 24)
        );
        assert_eq!(
            log_file_date("app-2024-12-24.log"),
            NaiveDate::from_ymd_opt(2024, 12, 24)
        );
        assert_eq!(log_file_date("audit-2024-12-24.log"), None);
        assert_eq!(log_file_date("app.log"), None);
    }

    #[test]
    fn test_cleanup_removes_only_old_files() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("app.2000-01-01.log");
        let today = dir
            .path()
            .join(format!("app.{}.log", Local::now().format("%Y-%m-%d")));
        let other = dir.path().join("notes.txt");
        for path in [&old, &today, &other] {
            fs::write(path, "x").unwrap();
        }

        cleanup_old_logs(dir.path()).unwrap();

        assert!(!old.exists());
        assert!(today.exists());
        assert!(other.exists());
    }

    #[test]
    fn test_cleanup_missing_dir_is_ok() {
        assert!(cleanup_old_logs(Path::new("/nonexistent/logs")).is_ok());
    }
}
