use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "GALAH_LOG";

/// How the process was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Language server on stdio. Logs go to the file only.
    Server,
    /// One-shot command. Logs also go to stderr.
    Command,
}

impl LogMode {
    /// File prefix under [`log_dir`], e.g. `lsp.log.2026-10-19`.
    pub fn component(self) -> &'static str {
        match self {
            LogMode::Server => "lsp",
            LogMode::Command => "cli",
        }
    }

    pub fn to_stderr(self) -> bool {
        self == LogMode::Command
    }
}

/// Directory holding the rolling log files, `~/.galah/logs`.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".galah/logs")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_logging(mode: LogMode) -> WorkerGuard {
    let log_dir = log_dir();
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, mode.component());
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer);

    if mode.to_stderr() {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_mode_keeps_stdio_clear() {
        assert_eq!(LogMode::Server.component(), "lsp");
        assert!(!LogMode::Server.to_stderr());
        assert_eq!(LogMode::Command.component(), "cli");
        assert!(LogMode::Command.to_stderr());
    }

    #[test]
    fn logs_live_under_the_home_directory() {
        assert!(log_dir().ends_with(".galah/logs"));
    }
}
