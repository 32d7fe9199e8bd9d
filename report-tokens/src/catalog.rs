//! Host token catalog and the user-listing token contribution.

use std::fmt;

use report_primitives::Token;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// Default description advertised for the list token.
pub const LIST_DESCRIPTION: &str = "List all users on the site";
/// Default description advertised for the table token.
pub const TABLE_DESCRIPTION: &str = "Display all users in a table format";

/// Insertion-ordered mapping from token string to human-readable description.
///
/// Serializes as a JSON object so it can round-trip through the host's token
/// list filter unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenCatalog {
    entries: Vec<(String, String)>,
}

impl TokenCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the description for `token`.
    ///
    /// Existing tokens keep their position; new tokens are appended.
    pub fn insert(&mut self, token: impl Into<String>, description: impl Into<String>) {
        let token = token.into();
        let description = description.into();
        match self.entries.iter_mut().find(|(key, _)| *key == token) {
            Some((_, existing)) => *existing = description,
            None => self.entries.push((token, description)),
        }
    }

    /// Returns the description registered for `token`.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == token)
            .map(|(_, description)| description.as_str())
    }

    /// Returns `true` when `token` has an entry.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(token, description)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(token, description)| (token.as_str(), description.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for TokenCatalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (token, description) in iter {
            catalog.insert(token, description);
        }
        catalog
    }
}

impl Serialize for TokenCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (token, description) in &self.entries {
            map.serialize_entry(token, description)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TokenCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = TokenCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of token strings to descriptions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut catalog = TokenCatalog::new();
                while let Some((token, description)) = access.next_entry::<String, String>()? {
                    catalog.insert(token, description);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// The pair of tokens this extension contributes, with their descriptions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserTokens {
    list: Token,
    table: Token,
    list_description: String,
    table_description: String,
}

impl UserTokens {
    /// Creates a token pair with the default descriptions.
    #[must_use]
    pub fn new(list: Token, table: Token) -> Self {
        Self {
            list,
            table,
            list_description: LIST_DESCRIPTION.to_owned(),
            table_description: TABLE_DESCRIPTION.to_owned(),
        }
    }

    /// Overrides the catalog descriptions.
    #[must_use]
    pub fn with_descriptions(
        mut self,
        list_description: impl Into<String>,
        table_description: impl Into<String>,
    ) -> Self {
        self.list_description = list_description.into();
        self.table_description = table_description.into();
        self
    }

    /// Token replaced with the plain text listing.
    #[must_use]
    pub fn list(&self) -> &Token {
        &self.list
    }

    /// Token replaced with the HTML table.
    #[must_use]
    pub fn table(&self) -> &Token {
        &self.table
    }

    /// Catalog description of the list token.
    #[must_use]
    pub fn list_description(&self) -> &str {
        &self.list_description
    }

    /// Catalog description of the table token.
    #[must_use]
    pub fn table_description(&self) -> &str {
        &self.table_description
    }
}

impl Default for UserTokens {
    fn default() -> Self {
        Self::new(Token::all_users(), Token::all_users_table())
    }
}

/// Adds `tokens` to the host catalog, creating it when the host has not
/// initialised one yet.
///
/// Pre-existing entries are always retained.
#[must_use]
pub fn register_tokens(catalog: Option<TokenCatalog>, tokens: &UserTokens) -> TokenCatalog {
    let mut catalog = catalog.unwrap_or_default();
    catalog.insert(tokens.list.as_str(), tokens.list_description.as_str());
    catalog.insert(tokens.table.as_str(), tokens.table_description.as_str());
    debug!(entries = catalog.len(), "registered user listing tokens");
    catalog
}

/// [`register_tokens`] with the default `[allusers]` / `[allusers.table]` pair.
#[must_use]
pub fn register_user_tokens(catalog: Option<TokenCatalog>) -> TokenCatalog {
    register_tokens(catalog, &UserTokens::default())
}
