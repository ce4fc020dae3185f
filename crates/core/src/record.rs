//! Directory user records
//!
//! A [`UserRecord`] is the attribute map the console fetches for the
//! user-edit page. Attribute names follow LDAP semantics: case-insensitive
//! and multi-valued. Typed accessors sit on top of the raw map so callers
//! never re-parse well-known attributes themselves.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{AccountConsoleError, Result};
use crate::expiry;

/// Well-known directory attribute names, in canonical lowercase form.
pub mod attrs {
    /// Login name of the account.
    pub const UID: &str = "uid";
    /// Password expiration instant, an LDAP GeneralizedTime string.
    pub const PASSWORD_EXPIRATION: &str = "krbpasswordexpiration";
    /// Server-assigned entry UUID (RFC 4530).
    pub const ENTRY_UUID: &str = "entryuuid";
}

/// A user entry as fetched from the directory.
///
/// `uid`, `UID` and `Uid` all address the same attribute. Every attribute
/// holds a list of values; single-valued attributes are read through
/// [`first_value`](UserRecord::first_value). An attribute with no values
/// behaves exactly like an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserRecord {
    attributes: HashMap<String, Vec<String>>,
}

impl UserRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record carrying only a `uid` attribute.
    pub fn with_uid(uid: impl Into<String>) -> Self {
        let mut record = Self::new();
        record.add_value(attrs::UID, uid);
        record
    }

    /// Build a record from a raw attribute map, normalizing names.
    ///
    /// Keys differing only in case are merged into one attribute.
    pub fn from_attributes(attributes: HashMap<String, Vec<String>>) -> Self {
        let mut record = Self::new();
        for (name, values) in attributes {
            record
                .attributes
                .entry(canonical(&name))
                .or_default()
                .extend(values);
        }
        record
    }

    /// Replace every value of an attribute.
    pub fn set_attribute(&mut self, name: &str, values: Vec<String>) {
        self.attributes.insert(canonical(name), values);
    }

    /// Append one value to an attribute, creating the attribute if absent.
    pub fn add_value(&mut self, name: &str, value: impl Into<String>) {
        self.attributes
            .entry(canonical(name))
            .or_default()
            .push(value.into());
    }

    /// All values of an attribute, or an empty slice when it is absent.
    pub fn values(&self, name: &str) -> &[String] {
        self.attributes
            .get(&canonical(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First value of an attribute, if present.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    /// Whether the record carries at least one value for an attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        !self.values(name).is_empty()
    }

    /// Login name of the account.
    pub fn uid(&self) -> Option<&str> {
        self.first_value(attrs::UID)
    }

    /// Parsed password expiration instant.
    ///
    /// `Ok(None)` when the record carries no expiration attribute. An error
    /// is raised only when a value is present but does not parse; absence is
    /// the legitimate "no expiration known" state.
    pub fn password_expiration(&self) -> Result<Option<DateTime<Utc>>> {
        match self.first_value(attrs::PASSWORD_EXPIRATION) {
            Some(raw) => expiry::parse_expiration(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Server-assigned entry UUID, if the directory exposes one.
    pub fn entry_uuid(&self) -> Result<Option<Uuid>> {
        match self.first_value(attrs::ENTRY_UUID) {
            Some(raw) => Uuid::parse_str(raw).map(Some).map_err(|e| {
                AccountConsoleError::malformed_attribute(attrs::ENTRY_UUID, raw, e.to_string())
            }),
            None => Ok(None),
        }
    }
}

impl<'de> Deserialize<'de> for UserRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Route through from_attributes so wire keys are normalized too.
        let attributes = HashMap::<String, Vec<String>>::deserialize(deserializer)?;
        Ok(Self::from_attributes(attributes))
    }
}

fn canonical(name: &str) -> String {
    name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_attribute_names_are_case_insensitive() {
        let mut record = UserRecord::new();
        record.add_value("krbPasswordExpiration", "20301231235959Z");
        assert_eq!(
            record.first_value(attrs::PASSWORD_EXPIRATION),
            Some("20301231235959Z")
        );
        assert!(record.has_attribute("KRBPASSWORDEXPIRATION"));
    }

    #[test]
    fn test_multi_valued_attributes_preserve_insertion_order() {
        let mut record = UserRecord::new();
        record.add_value("mail", "one@example.com");
        record.add_value("MAIL", "two@example.com");
        assert_eq!(record.values("mail"), ["one@example.com", "two@example.com"]);
        assert_eq!(record.first_value("mail"), Some("one@example.com"));
    }

    #[test]
    fn test_set_attribute_replaces_values() {
        let mut record = UserRecord::with_uid("alice");
        record.set_attribute("UID", vec!["bob".to_string()]);
        assert_eq!(record.uid(), Some("bob"));
        assert_eq!(record.values(attrs::UID).len(), 1);
    }

    #[test]
    fn test_from_attributes_merges_case_variants() {
        let mut raw = HashMap::new();
        raw.insert("Mail".to_string(), vec!["one@example.com".to_string()]);
        raw.insert("mail".to_string(), vec!["two@example.com".to_string()]);
        let record = UserRecord::from_attributes(raw);
        assert_eq!(record.values("mail").len(), 2);
    }

    #[test]
    fn test_empty_attribute_behaves_like_absent() {
        let mut record = UserRecord::new();
        record.set_attribute("mail", Vec::new());
        assert!(!record.has_attribute("mail"));
        assert_eq!(record.first_value("mail"), None);
    }

    #[test]
    fn test_password_expiration_absent_is_ok_none() {
        let record = UserRecord::with_uid("alice");
        assert_eq!(record.password_expiration().unwrap(), None);
    }

    #[test]
    fn test_password_expiration_parses_generalized_time() {
        let mut record = UserRecord::new();
        record.add_value(attrs::PASSWORD_EXPIRATION, "20250607120000Z");
        let expires = record.password_expiration().unwrap().unwrap();
        assert_eq!(expires, Utc.with_ymd_and_hms(2025, 6, 7, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_password_expiration_malformed_is_an_error() {
        let mut record = UserRecord::new();
        record.add_value(attrs::PASSWORD_EXPIRATION, "not-a-timestamp");
        let err = record.password_expiration().unwrap_err();
        assert!(matches!(err, AccountConsoleError::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_entry_uuid_round_trips() {
        let id = Uuid::new_v4();
        let mut record = UserRecord::with_uid("alice");
        record.add_value("entryUUID", id.to_string());
        assert_eq!(record.entry_uuid().unwrap(), Some(id));
    }

    #[test]
    fn test_entry_uuid_malformed_is_an_error() {
        let mut record = UserRecord::new();
        record.add_value(attrs::ENTRY_UUID, "zzz");
        let err = record.entry_uuid().unwrap_err();
        assert!(matches!(err, AccountConsoleError::MalformedAttribute { .. }));
    }

    #[test]
    fn test_deserialize_normalizes_attribute_names() {
        let json = r#"{"UID": ["alice"], "krbPasswordExpiration": ["20301231235959Z"]}"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.uid(), Some("alice"));
        assert!(record.has_attribute(attrs::PASSWORD_EXPIRATION));
    }

    #[test]
    fn test_serialize_is_a_plain_attribute_map() {
        let record = UserRecord::with_uid("alice");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "uid": ["alice"] }));
    }
}
