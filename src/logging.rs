use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter directive, e.g. `debug`
pub const LOG_ENV: &str = "LOGGATOR_LOG";

/// Default filter for a given verbosity (-1 quiet, 0 default, 1.. verbose)
pub fn level_for_verbosity(verbosity: i8) -> &'static str {
    match verbosity {
        i8::MIN..=-1 => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize diagnostics on stderr. `LOGGATOR_LOG` wins over the verbosity
/// flags when it holds a valid filter.
pub fn init_logging(verbosity: i8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    // Summary output owns stdout, diagnostics go to stderr
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
