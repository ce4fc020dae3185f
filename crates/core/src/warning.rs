//! Expiration warning presentation
//!
//! Turns an [`ExpirationStatus`] into the banner the user-edit page shows
//! above the form. Wording is part of the page contract, so the tests here
//! assert the rendered strings verbatim.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AccountConsoleError, Result};
use crate::expiry::{self, ExpirationStatus, ExpiryState, WarningPolicy};
use crate::record::{attrs, UserRecord};

/// Unit label when exactly one whole day remains.
const DAY_SINGULAR: &str = "day";
/// Unit label for every other count, zero and negatives included.
const DAY_PLURAL: &str = "days";

/// A banner for the user-edit page.
///
/// At most one warning exists per evaluation. The variants are mutually
/// exclusive by construction, and an expired password always wins over an
/// in-window one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpiryWarning {
    /// The password expires inside the warning window.
    ExpiringSoon { text: String },
    /// The password expiration instant has passed.
    Expired { text: String },
}

impl ExpiryWarning {
    /// Rendered banner text.
    pub fn text(&self) -> &str {
        match self {
            Self::ExpiringSoon { text } | Self::Expired { text } => text,
        }
    }

    /// Lifecycle state the banner reports.
    pub fn state(&self) -> ExpiryState {
        match self {
            Self::ExpiringSoon { .. } => ExpiryState::ExpiringSoon,
            Self::Expired { .. } => ExpiryState::Expired,
        }
    }

    /// Stable discriminant, identical to the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        self.state().as_str()
    }
}

/// Choose the warning, if any, for an evaluated status.
///
/// `identifier` is the name the message addresses the account by, normally
/// the record's `uid`. Valid statuses yield `None`; expired statuses yield
/// the expired banner even if a window condition were also met.
pub fn select_warning(identifier: &str, status: &ExpirationStatus) -> Option<ExpiryWarning> {
    // The unit is chosen from the raw day count before any branch is taken:
    // exactly one remaining day reads "day", every other count reads "days".
    let unit = match status.days_remaining() {
        Some(1) => DAY_SINGULAR,
        _ => DAY_PLURAL,
    };
    match (status.state(), status.days_remaining()) {
        (ExpiryState::Expired, _) => Some(ExpiryWarning::Expired {
            text: format!("{}'s password has expired", identifier),
        }),
        (ExpiryState::ExpiringSoon, Some(days)) => Some(ExpiryWarning::ExpiringSoon {
            text: format!(
                "{}'s password will expire in {} {}",
                identifier, days, unit
            ),
        }),
        (ExpiryState::ExpiringSoon, None) | (ExpiryState::Valid, _) => None,
    }
}

/// Evaluate a record and render its warning in one step.
///
/// This is the call the user-edit page makes when it loads a user: the
/// record's expiration attribute is evaluated at `now` under `policy`, and
/// the resulting banner (or `None`) comes back. The record must carry a
/// `uid`, otherwise the message would have nobody to address.
pub fn password_warning(
    record: &UserRecord,
    now: DateTime<Utc>,
    policy: &WarningPolicy,
) -> Result<Option<ExpiryWarning>> {
    let uid = record
        .uid()
        .ok_or_else(|| AccountConsoleError::MissingAttribute(attrs::UID.to_string()))?;
    let status = expiry::evaluate_record(record, now, policy)?;
    Ok(select_warning(uid, &status))
}
