//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "warn";
/// Filter used with `--verbose`.
pub const VERBOSE_LEVEL: &str = "debug";

/// Filter directive for the given verbosity.
pub fn level_for(verbose: bool) -> &'static str {
    if verbose { VERBOSE_LEVEL } else { DEFAULT_LEVEL }
}

/// Install the global subscriber, writing to stderr so stdout stays
/// machine-readable. `RUST_LOG` wins over `level`.
pub fn init_subscriber(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    // try_init is a no-op if a subscriber is already set
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.compact().try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(false), "warn");
        assert_eq!(level_for(true), "debug");
    }

    #[test]
    fn init_twice_is_harmless() {
        init_subscriber("info", false);
        init_subscriber("debug", true);
        tracing::info!("still logging");
    }
}
