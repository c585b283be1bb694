//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use std::sync::Once;

use miragekit_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MIRAGEKIT_LOG=miragekit_session=debug`.
pub const LOG_ENV: &str = "MIRAGEKIT_LOG";

static INIT: Once = Once::new();

/// Initialize human-readable logging filtered by `MIRAGEKIT_LOG`.
///
/// Falls back to `info` when the variable is unset or invalid.
/// Only the first initialization in a process takes effect.
pub fn init_tracing() {
    init_tracing_with_config(&ObservabilityConfig::default());
}

/// Initialize logging from configuration. `MIRAGEKIT_LOG` still takes precedence
/// over `config.log_level`.
pub fn init_tracing_with_config(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    install(filter, config.json_logs);
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    install(filter, false);
}

fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr);
        // `try_init` leaves an existing global subscriber (e.g. a test harness) in place.
        let _ = if json {
            builder
                .json()
                .with_file(true)
                .with_line_number(true)
                .try_init()
        } else {
            builder.try_init()
        };
    });
}
