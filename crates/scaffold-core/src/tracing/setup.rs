//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SCAFFOLD_LOG";

/// Initialize the scaffold tracing/logging system.
///
/// Reads `SCAFFOLD_LOG` for per-subsystem log levels.
/// Format: `SCAFFOLD_LOG=scaffold_analysis::analyzer=debug,scaffold_analysis::coverage=info`
///
/// Falls back to `scaffold=info` if `SCAFFOLD_LOG` is not set or is invalid.
/// Output goes to stderr so stdout stays free for reports.
///
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("scaffold=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(filter)
            .init();
    });
}
