//! tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level, which otherwise applies to this
//! crate and to `tower_http`.

use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

/// Development defaults: `info`, human-readable, stdout
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Install the global subscriber
///
/// `json` switches to one JSON object per line. Output goes to a daily
/// rolling `ledger-server` file when `log_dir` names an existing directory,
/// stdout otherwise.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ledger_server={level},tower_http={level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let file_dir = log_dir.map(Path::new).filter(|dir| dir.is_dir());

    match (file_dir, json) {
        (Some(dir), true) => builder
            .json()
            .with_writer(rolling::daily(dir, "ledger-server"))
            .init(),
        (Some(dir), false) => builder
            .with_ansi(false)
            .with_writer(rolling::daily(dir, "ledger-server"))
            .init(),
        (None, true) => builder.json().init(),
        (None, false) => builder.init(),
    }
}
