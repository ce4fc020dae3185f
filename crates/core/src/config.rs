//! Configuration loading for the Account Console
//!
//! Environment-variable configuration with `.env` file support. All
//! variables use the `ACCOUNT_CONSOLE_` prefix, and the override hierarchy
//! is: defaults < .env < environment.
//!
//! # Example
//!
//! ```no_run
//! use account_console_core::config::{load_dotenv, ConfigLoader, ExpiryWarningConfig};
//!
//! # fn main() -> Result<(), account_console_core::AccountConsoleError> {
//! load_dotenv();
//! let config = ExpiryWarningConfig::from_env()?;
//! config.validate()?;
//! println!("warning window: {} days", config.warning_window_days);
//! # Ok(())
//! # }
//! ```

use crate::error::{AccountConsoleError, Result};
use crate::expiry::{WarningPolicy, DEFAULT_WARNING_WINDOW_DAYS};

/// Configuration loader trait
///
/// Standardized methods for loading and validating configuration from
/// environment variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables
    ///
    /// Reads variables with the `ACCOUNT_CONSOLE_` prefix and falls back to
    /// defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if a variable is set but cannot be
    /// parsed into its typed value.
    fn from_env() -> Result<Self>;

    /// Validate configuration values
    ///
    /// Checks every field against its acceptable range. Called once at
    /// startup so misconfiguration fails the process, not a page render.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` naming the offending variable.
    fn validate(&self) -> Result<()>;
}

/// Expiry warning configuration
///
/// Deployment-level settings for the password-expiration warning shown on
/// the user-edit page.
///
/// # Environment Variables
///
/// - `ACCOUNT_CONSOLE_PASSWORD_WARNING_DAYS` (optional): whole days ahead of
///   expiration at which the warning starts (default: 1)
///
/// # Example
///
/// ```bash
/// export ACCOUNT_CONSOLE_PASSWORD_WARNING_DAYS="3"
/// ```
#[derive(Debug, Clone)]
pub struct ExpiryWarningConfig {
    /// Whole days ahead of expiration at which the warning starts
    pub warning_window_days: i64,
}

impl Default for ExpiryWarningConfig {
    fn default() -> Self {
        Self {
            warning_window_days: DEFAULT_WARNING_WINDOW_DAYS,
        }
    }
}

impl ConfigLoader for ExpiryWarningConfig {
    fn from_env() -> Result<Self> {
        let warning_window_days = parse_env_var(
            "ACCOUNT_CONSOLE_PASSWORD_WARNING_DAYS",
            ExpiryWarningConfig::default().warning_window_days,
        )?;

        Ok(Self {
            warning_window_days,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.warning_window_days < 1 {
            return Err(AccountConsoleError::configuration(
                format!(
                    "warning window must be at least one day, got {}",
                    self.warning_window_days
                ),
                "ACCOUNT_CONSOLE_PASSWORD_WARNING_DAYS",
            ));
        }
        Ok(())
    }
}

impl ExpiryWarningConfig {
    /// Build the validated [`WarningPolicy`] this configuration describes.
    pub fn policy(&self) -> Result<WarningPolicy> {
        self.validate()?;
        WarningPolicy::new(self.warning_window_days)
    }
}

/// Helper function to parse an environment variable with a default value
///
/// # Errors
///
/// Returns a `ConfigurationError` if the variable is set but does not parse.
fn parse_env_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|v| {
            v.parse::<T>().map_err(|e| {
                AccountConsoleError::configuration(format!("Failed to parse {}: {}", key, e), key)
            })
        })
        .unwrap_or(Ok(default))
}

/// Load a `.env` file if one is present.
///
/// A missing file is not an error. Anything else is reported on stderr,
/// since this usually runs before logging is initialized.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: failed to load .env file: {}", e);
        }
    }
}
