//! # Account Console Core
//!
//! Domain logic for the identity-management console's user-edit page.
//!
//! The crate evaluates a directory user record's password expiration and
//! selects the warning banner the page shows above the edit form: nothing,
//! "expires soon", or "already expired". Everything around that (form
//! handling, authentication, layout) lives in other services; this crate is
//! the reusable core they share.
//!
//! ## Modules
//!
//! - `record`: Directory user records with case-insensitive attributes
//! - `expiry`: Pure password-expiration evaluation
//! - `warning`: Warning message selection and rendering
//! - `directory`: Async lookup seam to the identity store
//! - `error`: Error types and handling
//! - `config`: Configuration loading and validation
//! - `observability`: Structured logging setup
//!
//! ## Example
//!
//! ```
//! use account_console_core::{
//!     expiry::WarningPolicy,
//!     record::{attrs, UserRecord},
//!     warning::password_warning,
//! };
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> account_console_core::Result<()> {
//! let mut record = UserRecord::with_uid("alice");
//! record.add_value(attrs::PASSWORD_EXPIRATION, "20250608090000Z");
//!
//! let now = Utc.with_ymd_and_hms(2025, 6, 7, 9, 0, 0).unwrap();
//! let warning = password_warning(&record, now, &WarningPolicy::default())?;
//!
//! assert_eq!(
//!     warning.map(|w| w.text().to_string()),
//!     Some("alice's password will expire in 1 day".to_string())
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod expiry;
pub mod observability;
pub mod record;
pub mod warning;

// Re-export commonly used types
pub use config::{load_dotenv, ConfigLoader, ExpiryWarningConfig};
pub use directory::{DirectoryLookup, MemoryDirectory};
pub use error::{AccountConsoleError, Result};
pub use expiry::{
    days_until_expiration, evaluate, evaluate_record, parse_expiration, ExpirationStatus,
    ExpiryState, WarningPolicy, DEFAULT_WARNING_WINDOW_DAYS,
};
pub use observability::{init_logging, LogConfig, LogFormat, ObservabilityError};
pub use record::{attrs, UserRecord};
pub use warning::{password_warning, select_warning, ExpiryWarning};
