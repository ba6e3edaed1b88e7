//! Logging setup for the command line client
//!
//! - Human-readable output on stderr, so stdout stays clean for results
//! - Optional JSON log file when `LEDGERLINK_LOG_DIR` is set, rotated daily
//!   or at 10MB

use anyhow::Result;
use rolling_file::{RollingConditionBasic, RollingFileAppender};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_DIR_ENV: &str = "LEDGERLINK_LOG_DIR";

const DEFAULT_FILTER: &str =
    "ledgerlink=info,ledgerlink_cli=info,ledgerlink_core=info,ledgerlink_rs=info";

/// Initialize logging. `verbose` lowers the default filter to debug.
///
/// Returns a guard that must be kept alive to ensure file logs are flushed
pub fn init_telemetry(verbose: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(DEFAULT_FILTER.replace("=info", "=debug"))
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) => {
            let log_dir = Path::new(&dir);
            std::fs::create_dir_all(log_dir)?;

            let file_appender = RollingFileAppender::new(
                log_dir.join("ledgerlink.log"),
                RollingConditionBasic::new()
                    .daily()
                    .max_size(10 * 1024 * 1024), // 10 MB
                9,
            )?;
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_current_span(true)
                .with_target(true)
                .with_thread_ids(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    tracing::debug!("Telemetry initialized");
    Ok(guard)
}
