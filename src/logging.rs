//! Logging setup
//!
//! The library only emits `tracing` events; the binary installs a subscriber
//! that writes them to stderr.

use tracing_subscriber::EnvFilter;

use crate::error::HolidayExportError;

/// Environment variable holding the log filter (`RUST_LOG` syntax)
pub const LOG_ENV_VAR: &str = "HOLIDAY_EXPORT_LOG";

/// Filter used when `HOLIDAY_EXPORT_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "holiday_export=debug,info"
    } else {
        "info"
    }
}

/// Install the global stderr subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<(), HolidayExportError> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| HolidayExportError::Config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "info");
        assert!(default_filter(true).contains("debug"));
        assert!(EnvFilter::try_new(default_filter(true)).is_ok());
    }
}
