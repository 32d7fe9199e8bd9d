//! Site identifier types.

use std::fmt::{self, Display, Formatter};
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

/// Identifier of a managed child site within the host dashboard.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(NonZeroU64);

impl SiteId {
    /// Creates an identifier from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSiteId`] when `raw` is zero.
    pub fn new(raw: u64) -> Result<Self, Error> {
        NonZeroU64::new(raw)
            .map(Self)
            .ok_or_else(|| Error::InvalidSiteId {
                value: raw.to_string(),
                reason: "site id must be greater than zero",
            })
    }

    /// Returns the underlying integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Display for SiteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<NonZeroU64> for SiteId {
    fn from(value: NonZeroU64) -> Self {
        Self(value)
    }
}

impl From<SiteId> for u64 {
    fn from(value: SiteId) -> Self {
        value.get()
    }
}

impl FromStr for SiteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().parse::<u64>().map_err(|_| Error::InvalidSiteId {
            value: s.to_owned(),
            reason: "site id must be a non-negative integer",
        })?;
        Self::new(raw)
    }
}

/// Host-supplied description of the site a report is generated for.
///
/// Hosts pass either an object or an associative structure; only its `id`
/// matters here. A descriptor without a usable id has no site.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SiteDescriptor {
    id: Option<SiteId>,
}

impl SiteDescriptor {
    /// Creates a descriptor pointing at `id`.
    #[must_use]
    pub const fn new(id: SiteId) -> Self {
        Self { id: Some(id) }
    }

    /// Descriptor that names no site.
    #[must_use]
    pub const fn unknown() -> Self {
        Self { id: None }
    }

    /// Reads the `id` field from a loosely shaped host value.
    ///
    /// Accepts positive integers, whole-number floats such as `7.0` and
    /// numeric strings. Anything else, including a zero id, yields
    /// [`SiteDescriptor::unknown`].
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let id = match value.get("id") {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().and_then(whole_number))
                .and_then(|raw| SiteId::new(raw).ok()),
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        };
        Self { id }
    }

    /// Returns the site identifier, if one was supplied.
    #[must_use]
    pub const fn id(self) -> Option<SiteId> {
        self.id
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn whole_number(raw: f64) -> Option<u64> {
    (raw.fract() == 0.0 && raw >= 1.0 && raw < u64::MAX as f64).then(|| raw as u64)
}

impl From<SiteId> for SiteDescriptor {
    fn from(value: SiteId) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn zero_is_rejected() {
        let err = SiteId::new(0).expect_err("zero should fail");
        assert!(matches!(err, Error::InvalidSiteId { .. }));
    }

    #[test]
    fn parses_numeric_strings() {
        let id: SiteId = " 42 ".parse().expect("parse");
        assert_eq!(id.get(), 42);
        assert!("abc".parse::<SiteId>().is_err());
        assert!("-3".parse::<SiteId>().is_err());
    }

    #[test]
    fn descriptor_reads_numeric_and_string_ids() {
        let numeric = SiteDescriptor::from_value(&json!({ "id": 7, "name": "Blog" }));
        assert_eq!(numeric.id().map(SiteId::get), Some(7));

        let textual = SiteDescriptor::from_value(&json!({ "id": "12" }));
        assert_eq!(textual.id().map(SiteId::get), Some(12));
    }

    #[test]
    fn descriptor_without_usable_id_is_unknown() {
        assert_eq!(SiteDescriptor::from_value(&json!({})), SiteDescriptor::unknown());
        assert_eq!(SiteDescriptor::from_value(&json!({ "id": 0 })), SiteDescriptor::unknown());
        assert_eq!(SiteDescriptor::from_value(&json!({ "id": -1 })), SiteDescriptor::unknown());
        assert_eq!(SiteDescriptor::from_value(&json!({ "id": null })), SiteDescriptor::unknown());
        assert_eq!(SiteDescriptor::from_value(&json!("7")), SiteDescriptor::unknown());
    }

    #[test]
    fn descriptor_accepts_whole_number_floats() {
        let whole = SiteDescriptor::from_value(&json!({ "id": 7.0 }));
        assert_eq!(whole.id().map(SiteId::get), Some(7));

        assert_eq!(SiteDescriptor::from_value(&json!({ "id": 7.5 })), SiteDescriptor::unknown());
        assert_eq!(SiteDescriptor::from_value(&json!({ "id": 0.0 })), SiteDescriptor::unknown());
        assert_eq!(SiteDescriptor::from_value(&json!({ "id": -2.0 })), SiteDescriptor::unknown());
    }
}
