//! Logging setup
//!
//! Installs a tracing subscriber for binaries and tests that embed the client.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "instrumented_cache=info";

/// Initializes a fmt subscriber filtered by `RUST_LOG`.
///
/// Defaults to `instrumented_cache=info`. Returns false when a global
/// subscriber was already installed, which makes repeated calls harmless.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        assert!(!init_tracing());
    }
}
