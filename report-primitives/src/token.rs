//! Placeholder tokens recognised inside report templates.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_TOKEN_LEN: usize = 64;

/// Token replaced with a plain text listing of the site's users.
pub const ALL_USERS: &str = "[allusers]";
/// Token replaced with an HTML table of the site's users.
pub const ALL_USERS_TABLE: &str = "[allusers.table]";

/// A bracketed placeholder such as `[allusers]`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Creates a token after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] if the token is not bracketed, too long,
    /// or its inner name contains unsupported characters.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        validate_token(&token)?;
        Ok(Self(token))
    }

    /// The `[allusers]` list token.
    #[must_use]
    pub fn all_users() -> Self {
        Self(ALL_USERS.to_owned())
    }

    /// The `[allusers.table]` table token.
    #[must_use]
    pub fn all_users_table() -> Self {
        Self(ALL_USERS_TABLE.to_owned())
    }

    /// Returns the full token text, brackets included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name between the brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0[1..self.0.len() - 1]
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(value: Token) -> Self {
        value.0
    }
}

impl TryFrom<String> for Token {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Token {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

fn validate_token(token: &str) -> Result<()> {
    let reject = |reason: String| Error::InvalidToken {
        token: token.to_owned(),
        reason,
    };

    if token.len() > MAX_TOKEN_LEN {
        return Err(reject(format!("token length must be <= {MAX_TOKEN_LEN}")));
    }

    let Some(name) = token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return Err(reject("token must be wrapped in square brackets".into()));
    };

    if name.is_empty() {
        return Err(reject("token name cannot be empty".into()));
    }

    if !name
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-' | '_' | '.'))
    {
        return Err(reject(
            "token name must contain lowercase alphanumeric, dash, underscore, or dot".into(),
        ));
    }

    Ok(())
}
