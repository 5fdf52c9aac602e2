//! Logging initialization.
//!
//! The library itself only emits `tracing` events. These helpers install a
//! subscriber for binaries and tests that want to see them.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "eksek=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the logging system.
///
/// Uses the `RUST_LOG` environment variable for filtering. If not set,
/// defaults to `eksek=info`.
///
/// # Panics
///
/// Panics if another tracing subscriber has already been set.
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Err` if a subscriber has already been installed.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

/// Initialize logging with an explicit filter directive, such as the
/// `logging.level` of a [`RunnerConfig`](crate::config::RunnerConfig).
///
/// A bare level like `debug` is scoped to this crate. Target or full
/// directives such as `eksek` or `eksek=trace,other=warn` are used as-is.
pub fn init_with_filter(filter: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directive(filter)))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

/// Scope a bare level to this crate; pass any other directive through.
fn filter_directive(filter: &str) -> String {
    let filter = filter.trim();
    if filter.parse::<LevelFilter>().is_ok() {
        format!("eksek={filter}")
    } else {
        filter.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(filter: &str) -> Option<LevelFilter> {
        EnvFilter::new(filter_directive(filter)).max_level_hint()
    }

    #[test]
    fn test_bare_level_scoped_to_crate() {
        assert_eq!(filter_directive("debug"), "eksek=debug");
        assert_eq!(filter_directive(" warn "), "eksek=warn");
        assert_eq!(hint("debug"), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_target_directive_passed_through() {
        assert_eq!(filter_directive("eksek"), "eksek");
        assert_eq!(hint("eksek"), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_full_directive_passed_through() {
        assert_eq!(filter_directive("eksek=trace,other=warn"), "eksek=trace,other=warn");
        assert_eq!(hint("eksek=trace,other=warn"), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_try_init_idempotent() {
        // Whichever call comes first may win; neither may panic.
        let _ = try_init();
        let _ = try_init();
        let _ = init_with_filter("debug");
    }

    #[test]
    fn test_logging_works() {
        let _ = try_init();

        tracing::info!("test info message");
        tracing::debug!(exit_code = 0, "test debug message");
        tracing::warn!("test warn message");
    }
}
