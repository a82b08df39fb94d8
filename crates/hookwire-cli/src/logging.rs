// Logging setup for the hookwire binary

use tracing::Level;
use tracing_subscriber::fmt;

/// Environment variable naming a log level (trace, debug, info, warn, error)
pub const LOG_ENV: &str = "HOOKWIRE_LOG";

/// Parse a level name, case-insensitively
pub fn parse_level(name: &str) -> Option<Level> {
    match name.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Level selected by the CLI flags, falling back to `env_level`
///
/// `--quiet` wins over `--verbose`; with neither flag and no usable
/// environment value the level is WARN.
pub fn select_level(verbose: bool, quiet: bool, env_level: Option<&str>) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        env_level.and_then(parse_level).unwrap_or(Level::WARN)
    }
}

/// Install the stderr subscriber
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_logging(verbose: bool, quiet: bool) {
    let env_level = std::env::var(LOG_ENV).ok();
    let level = select_level(verbose, quiet, env_level.as_deref());

    let _ = fmt()
        .with_max_level(level)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}
