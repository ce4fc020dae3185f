//! Logging configuration and initialization

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Logging setup errors
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Machine-readable JSON lines
    Json,
    /// Human-readable output for local development
    Pretty,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

/// Configuration for console logging
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive, e.g. "info" or "account_console_core=debug"
    pub filter: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables
    ///
    /// - ACCOUNT_CONSOLE_LOG_LEVEL: filter directive (falls back to RUST_LOG)
    /// - ACCOUNT_CONSOLE_LOG_FORMAT: "json" or "pretty" (default: pretty)
    ///
    /// Unknown format values fall back to pretty output rather than failing;
    /// a bad filter directive is caught by [`validate`](Self::validate) or at
    /// initialization.
    pub fn from_env() -> Self {
        let filter = std::env::var("ACCOUNT_CONSOLE_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| LogConfig::default().filter);

        let format = std::env::var("ACCOUNT_CONSOLE_LOG_FORMAT")
            .map(|v| {
                if v.eq_ignore_ascii_case("json") {
                    LogFormat::Json
                } else {
                    LogFormat::Pretty
                }
            })
            .unwrap_or(LogFormat::Pretty);

        Self { filter, format }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ObservabilityError> {
        self.env_filter().map(|_| ())
    }

    fn env_filter(&self) -> Result<EnvFilter, ObservabilityError> {
        EnvFilter::try_new(&self.filter).map_err(|e| ObservabilityError::InvalidFilter {
            filter: self.filter.clone(),
            reason: e.to_string(),
        })
    }
}

/// Initialize console logging
///
/// Must be called once at application startup. A second call reports
/// `SubscriberInit` because the global subscriber is already set.
pub fn init_logging(config: LogConfig) -> Result<(), ObservabilityError> {
    let filter = config.env_filter()?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    }
    .map_err(|e| ObservabilityError::SubscriberInit(e.to_string()))?;

    tracing::info!(
        filter = %config.filter,
        format = config.format.as_str(),
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn lock_env() -> MutexGuard<'static, ()> {
        ENV_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_config_from_env() {
        let _guard = lock_env();
        env::set_var("ACCOUNT_CONSOLE_LOG_LEVEL", "debug");
        env::set_var("ACCOUNT_CONSOLE_LOG_FORMAT", "JSON");

        let config = LogConfig::from_env();
        assert_eq!(config.filter, "debug");
        assert_eq!(config.format, LogFormat::Json);

        env::remove_var("ACCOUNT_CONSOLE_LOG_LEVEL");
        env::remove_var("ACCOUNT_CONSOLE_LOG_FORMAT");
    }

    #[test]
    fn test_log_config_rust_log_fallback() {
        let _guard = lock_env();
        let previous = env::var("RUST_LOG").ok();
        env::remove_var("ACCOUNT_CONSOLE_LOG_LEVEL");
        env::set_var("RUST_LOG", "warn");

        let config = LogConfig::from_env();
        assert_eq!(config.filter, "warn");

        match previous {
            Some(value) => env::set_var("RUST_LOG", value),
            None => env::remove_var("RUST_LOG"),
        }
    }

    #[test]
    fn test_unknown_format_falls_back_to_pretty() {
        let _guard = lock_env();
        env::set_var("ACCOUNT_CONSOLE_LOG_FORMAT", "xml");

        let config = LogConfig::from_env();
        assert_eq!(config.format, LogFormat::Pretty);

        env::remove_var("ACCOUNT_CONSOLE_LOG_FORMAT");
    }

    #[test]
    fn test_validate_accepts_filter_directives() {
        let config = LogConfig {
            filter: "account_console_core=debug,warn".to_string(),
            format: LogFormat::Json,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_directives() {
        let config = LogConfig {
            filter: "expiry=debug=trace".to_string(),
            format: LogFormat::Pretty,
        };
        let result = config.validate();
        assert!(matches!(
            result.unwrap_err(),
            ObservabilityError::InvalidFilter { .. }
        ));
    }

    #[test]
    fn test_init_logging_rejects_bad_filter() {
        let config = LogConfig {
            filter: "expiry=debug=trace".to_string(),
            format: LogFormat::Pretty,
        };
        assert!(init_logging(config).is_err());
    }

    #[test]
    fn test_init_logging() {
        let config = LogConfig {
            filter: "info".to_string(),
            format: LogFormat::Json,
        };

        // May fail if another test already installed the global subscriber;
        // we only ensure it does not panic.
        let result = init_logging(config);
        let _ = result;
    }
}
