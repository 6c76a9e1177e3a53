//! Tracing subscriber assembly: rolling file plus optional stderr.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` seeds the filter. Log
/// files roll daily under the configured directory. The returned guard
/// must be held for the life of the process or buffered lines are lost
/// on shutdown.
pub fn init(config: &LogConfig) -> WorkerGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = tracing_appender::rolling::daily(&config.dir, "jobhistory-mcp.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(file_writer));

    if config.to_stderr {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        registry.init();
    }

    guard
}
