//! Structured logging setup.
//!
//! Logs go to stderr so command output on stdout stays machine readable,
//! and are copied to a log file when one is configured. `RUST_LOG` takes
//! precedence over the configured level.

use std::path::Path;

use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, VersionBumperError};

/// Logging knobs gathered from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogOptions {
    pub quiet: bool,
    pub debug: bool,
    pub level: Option<String>,
}

impl LogOptions {
    /// Pick the effective level: `--quiet`, then `--debug`, then an explicit
    /// level, then `fallback` (usually from the config file).
    pub fn resolve(&self, fallback: &str) -> String {
        if self.quiet {
            "error".to_string()
        } else if self.debug {
            "debug".to_string()
        } else if let Some(level) = &self.level {
            level.to_lowercase()
        } else {
            fallback.to_lowercase()
        }
    }
}

/// Build the filter for `level`, letting `RUST_LOG` override it.
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| VersionBumperError::config(format!("invalid log level '{level}': {e}")))
}

/// Open `path` for appending log lines, creating missing parent
/// directories.
pub fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let name = path
        .file_name()
        .ok_or_else(|| VersionBumperError::config(format!("invalid log file: {}", path.display())))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .map_err(|e| {
            VersionBumperError::config(format!("could not open log file {}: {e}", path.display()))
        })
}

/// Install the global subscriber, writing to stderr and, when `file` is
/// set, appending the same messages to that file.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init(level: &str, file: Option<&Path>) -> Result<()> {
    let filter = env_filter(level)?;
    let file_layer = match file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender(path)?)
                .with_ansi(false)
                .with_target(false),
        ),
        None => None,
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(file_layer)
        .try_init();
    if let Err(err) = installed {
        debug!(%err, "keeping the existing tracing subscriber");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        let options = LogOptions {
            quiet: true,
            debug: true,
            level: Some("trace".to_string()),
        };
        assert_eq!(options.resolve("warn"), "error");

        let options = LogOptions {
            debug: true,
            level: Some("trace".to_string()),
            ..Default::default()
        };
        assert_eq!(options.resolve("warn"), "debug");

        let options = LogOptions {
            level: Some("INFO".to_string()),
            ..Default::default()
        };
        assert_eq!(options.resolve("warn"), "info");

        assert_eq!(LogOptions::default().resolve("Warn"), "warn");
    }

    #[test]
    fn test_file_appender_creates_parent_dirs() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("bumper.log");
        let mut appender = file_appender(&path).unwrap();
        appender.write_all(b"hello\n").unwrap();
        appender.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_file_appender_rejects_path_without_name() {
        assert!(file_appender(Path::new("/")).is_err());
    }

    #[test]
    fn test_init_twice_keeps_first_subscriber() {
        assert!(init("warn", None).is_ok());
        assert!(init("debug", None).is_ok());
    }

    #[test]
    fn test_invalid_level_rejected() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(env_filter("version_bumper=loudest").is_err());
        }
    }
}
