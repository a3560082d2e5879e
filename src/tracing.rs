//! Logging setup and selection diagnostics
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=editbridge::dispatch=trace` - module-level filtering
//!
//! Logs are also written to `~/.config/editbridge/logs/editbridge.log` with
//! daily rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::adapter::selection;
use crate::host::Host;

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "editbridge.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Selection set captured around a dispatch, for diffing in debug logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub ranges: Vec<(usize, usize)>,
}

impl SelectionSnapshot {
    pub fn capture(host: &dyn Host) -> Self {
        Self {
            ranges: selection::list(host)
                .into_iter()
                .map(|r| (r.start, r.end))
                .collect(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SelectionSnapshot) -> Option<String> {
        if self.ranges.len() != other.ranges.len() {
            return Some(format!(
                "selection count: {} → {}",
                self.ranges.len(),
                other.ranges.len()
            ));
        }

        let changes: Vec<String> = self
            .ranges
            .iter()
            .zip(&other.ranges)
            .enumerate()
            .filter(|(_, (before, after))| before != after)
            .map(|(i, (before, after))| {
                format!(
                    "#{}: {}..{} → {}..{}",
                    i, before.0, before.1, after.0, after.1
                )
            })
            .collect();

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
