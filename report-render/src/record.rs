//! Loosely shaped user records and alias-based field lookup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered candidate field names for one semantic attribute.
///
/// Candidates are tried in order; the first one holding a non-empty value
/// wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldAliases(&'static [&'static str]);

impl FieldAliases {
    /// Account login name.
    pub const USERNAME: Self = Self(&["login", "user_login"]);
    /// Contact email address.
    pub const EMAIL: Self = Self(&["email", "user_email"]);
    /// Role or roles, scalar or list.
    pub const ROLES: Self = Self(&["role", "roles"]);
    /// Registration timestamp.
    pub const REGISTERED: Self = Self(&["user_registered", "registered"]);

    /// Creates an alias list from static candidate names.
    #[must_use]
    pub const fn new(candidates: &'static [&'static str]) -> Self {
        Self(candidates)
    }

    /// Candidate names in priority order.
    #[must_use]
    pub const fn candidates(self) -> &'static [&'static str] {
        self.0
    }
}

/// A single user entry from a synchronized site, in whatever shape the sync
/// produced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord {
    fields: Map<String, Value>,
}

impl UserRecord {
    /// Wraps an already decoded field map.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Converts a JSON value into a record. Only objects qualify.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(fields)),
            _ => None,
        }
    }

    /// Returns the raw value stored under `name`.
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Text of the first alias holding a non-empty value.
    #[must_use]
    pub fn lookup(&self, aliases: FieldAliases) -> Option<String> {
        aliases
            .candidates()
            .iter()
            .filter_map(|name| self.fields.get(*name))
            .find_map(value_text)
    }

    /// Login name, or an empty string.
    #[must_use]
    pub fn username(&self) -> String {
        self.lookup(FieldAliases::USERNAME).unwrap_or_default()
    }

    /// Email address, or an empty string.
    #[must_use]
    pub fn email(&self) -> String {
        self.lookup(FieldAliases::EMAIL).unwrap_or_default()
    }

    /// Comma separated role names, if any are present.
    #[must_use]
    pub fn roles(&self) -> Option<String> {
        self.lookup(FieldAliases::ROLES)
    }

    /// Raw registration timestamp text, if present.
    #[must_use]
    pub fn registered(&self) -> Option<String> {
        self.lookup(FieldAliases::REGISTERED)
    }
}

impl From<Map<String, Value>> for UserRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Display text of a field value. `None` means the value counts as empty.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> UserRecord {
        UserRecord::from_value(value).expect("object")
    }

    #[test]
    fn alternate_names_match_canonical_names() {
        let canonical = record(json!({
            "login": "alice",
            "email": "a@x.com",
            "role": ["editor", "author"],
            "registered": "2024-01-15",
        }));
        let alternate = record(json!({
            "user_login": "alice",
            "user_email": "a@x.com",
            "roles": ["editor", "author"],
            "user_registered": "2024-01-15",
        }));

        assert_eq!(canonical.username(), alternate.username());
        assert_eq!(canonical.email(), alternate.email());
        assert_eq!(canonical.roles(), alternate.roles());
        assert_eq!(canonical.registered(), alternate.registered());
        assert_eq!(alternate.roles().as_deref(), Some("editor, author"));
    }

    #[test]
    fn first_alias_wins_when_both_present() {
        let user = record(json!({ "login": "first", "user_login": "second" }));
        assert_eq!(user.username(), "first");
    }

    #[test]
    fn empty_values_fall_through_to_next_alias() {
        let user = record(json!({
            "login": "",
            "user_login": "bob",
            "email": null,
            "user_email": "b@x.com",
            "role": [],
            "roles": "subscriber",
        }));
        assert_eq!(user.username(), "bob");
        assert_eq!(user.email(), "b@x.com");
        assert_eq!(user.roles().as_deref(), Some("subscriber"));
    }

    #[test]
    fn missing_fields_degrade_to_empty() {
        let user = record(json!({ "ID": 3 }));
        assert_eq!(user.username(), "");
        assert_eq!(user.email(), "");
        assert_eq!(user.roles(), None);
        assert_eq!(user.registered(), None);
    }

    #[test]
    fn scalars_are_stringified_and_nested_values_skipped() {
        let user = record(json!({
            "login": 1001,
            "roles": ["editor", { "cap": true }, ["x"], null, 7],
        }));
        assert_eq!(user.username(), "1001");
        assert_eq!(user.roles().as_deref(), Some("editor, 7"));
    }

    #[test]
    fn non_objects_are_not_records() {
        assert!(UserRecord::from_value(json!("alice")).is_none());
        assert!(UserRecord::from_value(json!([1, 2])).is_none());
    }
}
