//! Error types for the Account Console core

use thiserror::Error;

/// Result type alias for Account Console operations
pub type Result<T> = std::result::Result<T, AccountConsoleError>;

/// Errors surfaced by the Account Console core.
///
/// The core never logs or swallows an abnormal condition; every variant is
/// returned to the caller, which decides the page-level behavior. A user
/// record without an expiration attribute is *not* an error (it is the valid
/// "no expiration known" state and simply renders no warning).
#[derive(Debug, Error)]
pub enum AccountConsoleError {
    /// The directory handed us an expiration attribute that does not parse.
    #[error("malformed expiration timestamp '{value}': {reason}")]
    MalformedTimestamp { value: String, reason: String },

    /// Invalid warning-window or environment configuration. Raised at
    /// construction or load time, never per evaluation.
    #[error("configuration error: {message}")]
    ConfigurationError {
        message: String,
        key: Option<String>,
    },

    /// A record reached the presenter without a mandatory attribute.
    #[error("required attribute '{0}' is missing from the user record")]
    MissingAttribute(String),

    /// A non-timestamp attribute failed to parse into its typed form.
    #[error("malformed attribute '{name}' value '{value}': {reason}")]
    MalformedAttribute {
        name: String,
        value: String,
        reason: String,
    },

    /// A directory lookup implementation failed.
    #[error("directory error: {0}")]
    Directory(String),
}

impl AccountConsoleError {
    /// Create a `MalformedTimestamp` error for a raw attribute value.
    pub fn malformed_timestamp(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTimestamp {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a `ConfigurationError` tied to a specific configuration key.
    pub fn configuration(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Create a `MalformedAttribute` error for a typed accessor.
    pub fn malformed_attribute(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedAttribute {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

// Directory clients wrap their transport errors in anyhow; flatten them to
// the directory variant at this boundary.
impl From<anyhow::Error> for AccountConsoleError {
    fn from(err: anyhow::Error) -> Self {
        AccountConsoleError::Directory(err.to_string())
    }
}
