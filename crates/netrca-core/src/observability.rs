//! Tracing setup for binaries and harnesses embedding the engine.

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Environment variable consulted before the configured log level.
pub const LOG_ENV_VAR: &str = "NETRCA_LOG";

/// Install the global tracing subscriber.
///
/// `NETRCA_LOG` takes precedence over `config.log_level`.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_output {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Initialize tracing with a custom filter string (for testing or embedding).
///
/// Returns `false` if a global subscriber was already installed.
pub fn try_init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init()
        .is_ok()
}
