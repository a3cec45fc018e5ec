//! Tracing setup for the binary.
//!
//! Log lines go to stderr next to error messages, so only warnings show up
//! unless `-v` or `RUST_LOG` asks for more. `--log-file` adds a JSON copy of
//! every event for later inspection.

use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. Safe to call more than once; later calls
/// keep the first subscriber.
///
/// `verbose` raises this crate's level to `debug`. `log_file` names a file
/// whose directory is created if missing; it rotates daily.
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    // stderr is shared with error output, so stay quiet unless asked
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("linear_analytics={}", default_level)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    let Some(log_path) = log_file else {
        let _ = subscriber.try_init();
        return;
    };

    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let _ = std::fs::create_dir_all(&dir);
    let file_name = log_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "linear-analytics.log".into());

    let file_layer = fmt::layer()
        .with_writer(tracing_appender::rolling::daily(dir, file_name))
        .with_ansi(false)
        .json();
    let _ = subscriber.with(file_layer).try_init();
}
