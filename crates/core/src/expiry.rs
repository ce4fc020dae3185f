//! Password expiration evaluation
//!
//! Pure functions that turn a directory expiration instant into an
//! [`ExpirationStatus`] for the user-edit page. Evaluation never reads the
//! ambient clock; callers pass the instant they are rendering for, so the
//! same inputs always produce the same status.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AccountConsoleError, Result};
use crate::record::UserRecord;

/// Warning window applied when no deployment configuration overrides it.
pub const DEFAULT_WARNING_WINDOW_DAYS: i64 = 1;

/// Wire format of the directory's expiration attribute: LDAP GeneralizedTime
/// restricted to the UTC `Z` form, e.g. `20301231235959Z`.
const GENERALIZED_TIME_FORMAT: &str = "%Y%m%d%H%M%SZ";

const SECONDS_PER_DAY: i64 = 86_400;

/// How far ahead of an expiration the console starts warning.
///
/// Built once per deployment, not per evaluation. The window is validated at
/// construction, so evaluation itself can never fail on policy grounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningPolicy {
    warning_window_days: i64,
}

impl WarningPolicy {
    /// Create a policy that warns `warning_window_days` ahead of expiration.
    ///
    /// Windows below one day are rejected. A console configured with such a
    /// window would silently never warn anyone, so the misconfiguration is
    /// surfaced at startup instead of being clamped or ignored.
    pub fn new(warning_window_days: i64) -> Result<Self> {
        if warning_window_days < 1 {
            return Err(AccountConsoleError::ConfigurationError {
                message: format!(
                    "warning window must be at least one day, got {}",
                    warning_window_days
                ),
                key: None,
            });
        }
        Ok(Self {
            warning_window_days,
        })
    }

    /// Number of whole days ahead of expiration that trigger a warning.
    pub fn warning_window_days(&self) -> i64 {
        self.warning_window_days
    }
}

impl Default for WarningPolicy {
    fn default() -> Self {
        Self {
            warning_window_days: DEFAULT_WARNING_WINDOW_DAYS,
        }
    }
}

/// Lifecycle bucket of a password at one evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryState {
    /// No warning is due: no expiration is known, or it is far enough away.
    Valid,
    /// The expiration falls inside the warning window.
    ExpiringSoon,
    /// The expiration instant has passed, or falls before the next whole day.
    Expired,
}

impl ExpiryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::ExpiringSoon => "expiring_soon",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for ExpiryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of evaluating one user's password expiration.
///
/// Only [`evaluate`] constructs one and the fields stay private, so a status
/// can never pair `Expired` with an in-window day count or report days for a
/// user with no known expiration. Serialized into page payloads, but
/// deliberately not deserializable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpirationStatus {
    days_remaining: Option<i64>,
    state: ExpiryState,
}

impl ExpirationStatus {
    /// Floored whole days until expiration, `None` when none is known.
    pub fn days_remaining(&self) -> Option<i64> {
        self.days_remaining
    }

    /// Lifecycle bucket the evaluation landed in.
    pub fn state(&self) -> ExpiryState {
        self.state
    }

    /// True when the password expires inside the warning window.
    pub fn expires_soon(&self) -> bool {
        matches!(self.state, ExpiryState::ExpiringSoon)
    }

    /// True when the expiration instant has passed.
    pub fn is_expired(&self) -> bool {
        matches!(self.state, ExpiryState::Expired)
    }
}

/// Parse the directory's GeneralizedTime expiration value.
///
/// Accepts exactly the UTC form the directory emits (`YYYYMMDDHHMMSSZ`).
/// Anything else, including fractional seconds or a numeric zone offset, is
/// reported as malformed rather than guessed at.
pub fn parse_expiration(value: &str) -> Result<DateTime<Utc>> {
    // chrono skips whitespace ahead of each numeric field, so the wire shape
    // is pinned first: fourteen ASCII digits and the literal 'Z'.
    let bytes = value.as_bytes();
    if bytes.len() != 15 || bytes[14] != b'Z' || !bytes[..14].iter().all(u8::is_ascii_digit) {
        return Err(AccountConsoleError::malformed_timestamp(
            value,
            "expected YYYYMMDDHHMMSSZ",
        ));
    }
    NaiveDateTime::parse_from_str(value, GENERALIZED_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| AccountConsoleError::malformed_timestamp(value, e.to_string()))
}

/// Whole days between `now` and an expiration instant.
///
/// The whole-second difference is floored into 24-hour days: an expiration
/// later today is already day `0`, one exactly 24 hours out is day `1`, and
/// a passed instant goes negative. `None` propagates "no expiration known".
pub fn days_until_expiration(
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<i64> {
    expires_at.map(|at| (at - now).num_seconds().div_euclid(SECONDS_PER_DAY))
}

/// Evaluate a password expiration against a clock reading and a policy.
///
/// Day counts at or below zero classify as `Expired`, counts inside the
/// policy window as `ExpiringSoon`, and everything else as `Valid`. With no
/// expiration known the status is `Valid` with no day count.
pub fn evaluate(
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    policy: &WarningPolicy,
) -> ExpirationStatus {
    let days_remaining = days_until_expiration(expires_at, now);
    let state = match days_remaining {
        None => ExpiryState::Valid,
        Some(days) if days <= 0 => ExpiryState::Expired,
        Some(days) if days <= policy.warning_window_days => ExpiryState::ExpiringSoon,
        Some(_) => ExpiryState::Valid,
    };
    ExpirationStatus {
        days_remaining,
        state,
    }
}

/// Evaluate a directory record's expiration attribute.
///
/// A record without the attribute evaluates to `Valid`; a present but
/// malformed value is an error for the caller to surface.
pub fn evaluate_record(
    record: &UserRecord,
    now: DateTime<Utc>,
    policy: &WarningPolicy,
) -> Result<ExpirationStatus> {
    let expires_at = record.password_expiration()?;
    Ok(evaluate(expires_at, now, policy))
}
