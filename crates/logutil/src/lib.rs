//! Utilities for logging.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::SubscriberBuilder;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    HumanReadable,
    Json,
}

/// Map a `-v` count to a log level.
///
/// 0 => ERROR, 1 => INFO, 2 => DEBUG, 3+ => TRACE
pub const fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Configure the global subscriber.
///
/// `default_level` is used when `RUST_LOG` isn't set. Errors from installing
/// the subscriber are ignored, only the first call has an effect.
pub fn configure_global_logger<W>(default_level: Level, format: LogFormat, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level).into())
        .from_env_lossy();

    let builder = SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_file(true)
        .with_line_number(true);

    let _ = match format {
        LogFormat::HumanReadable => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Initialize a logger for tests.
///
/// Output is captured by the test harness. Safe to call from multiple tests.
pub fn init_test() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::TRACE.into())
        .from_env_lossy();

    let _ = SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Configure the global logger writing to stderr.
pub fn init_stderr(verbosity: u8, format: LogFormat) {
    configure_global_logger(level_from_verbosity(verbosity), format, io::stderr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(Level::ERROR, level_from_verbosity(0));
        assert_eq!(Level::INFO, level_from_verbosity(1));
        assert_eq!(Level::DEBUG, level_from_verbosity(2));
        assert_eq!(Level::TRACE, level_from_verbosity(7));
    }

    #[test]
    fn init_test_twice() {
        init_test();
        init_test();
    }
}
