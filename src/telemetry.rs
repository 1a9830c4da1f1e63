//! Tracing setup for hosts embedding `scrolly`.
//!
//! The engine only emits `tracing` events. Hosts that do not install a
//! subscriber of their own can use the compact one set up here.

/// Fallback filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn,scrolly=info";

/// Installs a compact subscriber filtered by `RUST_LOG` or [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback filter,
/// e.g. `"scrolly=debug"` to trace scene lifecycle transitions.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{init_default_tracing, init_tracing_with_filter};

    #[test]
    fn subscriber_is_installed_at_most_once() {
        let first = init_tracing_with_filter("scrolly=debug");
        assert_eq!(first, cfg!(feature = "telemetry"));
        assert!(!init_default_tracing());
    }
}
