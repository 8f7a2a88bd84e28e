use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter variable read before `RUST_LOG`.
const FILTER_ENV: &str = "MAPPERLENS_LOG";

/// The kind of process being logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// Language server. stdout carries JSON-RPC, so nothing reaches the console.
    Lsp,
    /// One-shot commands, echoed to stderr as well as the file.
    Cli,
}

impl LogSink {
    /// Prefix of the daily log file, e.g. `lsp.2024-01-21`.
    pub fn file_prefix(self) -> &'static str {
        match self {
            LogSink::Lsp => "lsp",
            LogSink::Cli => "cli",
        }
    }

    pub fn echoes_to_stderr(self) -> bool {
        matches!(self, LogSink::Cli)
    }
}

/// `~/.mapperlens/logs`, or `./.mapperlens/logs` without a home directory.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mapperlens")
        .join("logs")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Keep the guard alive until exit or
/// buffered file output is lost.
pub fn init_logging(sink: LogSink) -> WorkerGuard {
    let dir = log_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("mapperlens: cannot create {}: {}", dir.display(), e);
    }

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, sink.file_prefix()));

    let stderr_layer = sink.echoes_to_stderr().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(stderr_layer)
        .init();

    guard
}
