//! The report engine's per-section "other tokens" structure.

use std::collections::BTreeMap;
use std::fmt;

use report_primitives::Token;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Report section a token can appear in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSection {
    /// Main report body.
    Body,
    /// Report header.
    Header,
}

impl TokenSection {
    /// All sections the extension contributes to.
    pub const ALL: [Self; 2] = [Self::Body, Self::Header];

    /// Key used for the section in the host structure.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Header => "header",
        }
    }
}

impl fmt::Display for TokenSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Tokens handled outside the report engine, with their rendered values.
///
/// Unknown sections and top-level keys written by other extensions are kept
/// as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedTokens {
    #[serde(default)]
    other_tokens: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    other_tokens_data: BTreeMap<String, Map<String, Value>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ParsedTokens {
    /// Creates an empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the token list and value map of every section that lacks them.
    pub fn ensure_sections(&mut self) {
        for section in TokenSection::ALL {
            self.other_tokens.entry(section.key().to_owned()).or_default();
            self.other_tokens_data
                .entry(section.key().to_owned())
                .or_default();
        }
    }

    /// Declares that `token` is handled in `section`.
    pub fn advertise(&mut self, section: TokenSection, token: &Token) {
        let tokens = self.other_tokens.entry(section.key().to_owned()).or_default();
        if !tokens.iter().any(|existing| existing == token.as_str()) {
            tokens.push(token.as_str().to_owned());
        }
    }

    /// Sets the rendered value of `token` in `section`.
    pub fn provide(&mut self, section: TokenSection, token: &Token, value: impl Into<String>) {
        self.other_tokens_data
            .entry(section.key().to_owned())
            .or_default()
            .insert(token.as_str().to_owned(), Value::String(value.into()));
    }

    /// Tokens advertised for `section`.
    #[must_use]
    pub fn tokens(&self, section: TokenSection) -> &[String] {
        self.other_tokens
            .get(section.key())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Rendered value of `token` in `section`, if it is a string.
    #[must_use]
    pub fn value(&self, section: TokenSection, token: &str) -> Option<&str> {
        self.other_tokens_data
            .get(section.key())
            .and_then(|data| data.get(token))
            .and_then(Value::as_str)
    }
}
