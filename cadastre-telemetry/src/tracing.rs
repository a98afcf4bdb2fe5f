use std::sync::Once;

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;

/// Default directive applied when `RUST_LOG` is not set.
const DEFAULT_LOG_DIRECTIVES: &str = "info";

/// Initializes tracing for a service binary.
///
/// Installs a global subscriber writing human-readable events to stderr,
/// filtered by `RUST_LOG` (defaulting to `info`). The `service` name is
/// attached to every event as a field of the root span created by callers.
///
/// Returns an error if a global subscriber was already installed.
pub fn init_tracing(service: &str) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    tracing::info!(service, "tracing initialized");

    Ok(())
}

/// Initializes tracing for tests.
///
/// Safe to call from every test; initialization happens only once per
/// process. Output is captured by the test harness.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
