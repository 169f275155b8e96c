//! Logging setup.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Install the global subscriber. `RUST_LOG` overrides the default level.
///
/// Logs go to stderr so command output on stdout stays clean. Production
/// logs are JSON lines for aggregation.
pub(crate) fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info,mcbay_core=debug")
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if environment.is_production() {
        builder.json().with_target(false).init();
    } else {
        builder.with_target(true).init();
    }
}
