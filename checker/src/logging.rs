//! Lifecycle tracing for judges (spawn, EOF, abort, exit classification).
//!
//! This is separate from the diagnostic mirror in `io::mirror`: the mirror
//! echoes validated traffic in a fixed line format and ignores `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter for judges run with a verbose flag.
pub const VERBOSE_FILTER: &str = "checker=debug,judges=debug";

/// Build the filter from a `RUST_LOG`-style value, falling back to
/// `default` when the value is missing or does not parse.
pub fn filter(env_value: Option<&str>, default: &str) -> EnvFilter {
    env_value
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Install a compact stderr subscriber filtered by `RUST_LOG`, or by
/// `default` when that is unset.
///
/// ```bash
/// RUST_LOG=checker=debug judge guess -- ./solution
/// ```
pub fn init_with_default(default: &str) {
    let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    // Later calls keep the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter(env_value.as_deref(), default))
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn missing_env_uses_default() {
        assert_eq!(
            filter(None, DEFAULT_FILTER).max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            filter(None, VERBOSE_FILTER).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn env_value_overrides_default() {
        assert_eq!(
            filter(Some("trace"), DEFAULT_FILTER).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn unparsable_env_falls_back() {
        assert_eq!(
            filter(Some("checker=loudest"), "error").max_level_hint(),
            Some(LevelFilter::ERROR)
        );
    }
}
