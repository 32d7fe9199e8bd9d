//! Strongly typed configuration schema.

use report_primitives::{ALL_USERS, ALL_USERS_TABLE, Token};
use report_render::UserRenderer;
use report_render::date::{DEFAULT_DATE_FORMAT, is_valid_format};
use report_render::render::{NO_DATE, NO_ROLE, NO_USERS, TABLE_CLASS};
use report_tokens::UserTokens;
use report_tokens::catalog::{LIST_DESCRIPTION, TABLE_DESCRIPTION};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text substituted for both tokens when the data source fails.
pub const FETCH_ERROR: &str = "Error fetching users";

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while parsing or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema.
    #[error("configuration parse error: {source}")]
    Parse {
        /// Source [`serde_json::Error`].
        #[from]
        source: serde_json::Error,
    },
    /// A configured token string is malformed.
    #[error(transparent)]
    Token(#[from] report_primitives::Error),
    /// A value is syntactically fine but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Top-level configuration of the extension.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionConfig {
    /// Token strings and catalog descriptions.
    pub tokens: TokenConfig,
    /// Placeholder texts.
    pub messages: MessageConfig,
    /// Table rendering options.
    pub table: TableConfig,
}

/// Token strings and their catalog descriptions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenConfig {
    /// Token replaced with the plain text list.
    pub list: String,
    /// Token replaced with the HTML table.
    pub table: String,
    /// Catalog description of the list token.
    pub list_description: String,
    /// Catalog description of the table token.
    pub table_description: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            list: ALL_USERS.to_owned(),
            table: ALL_USERS_TABLE.to_owned(),
            list_description: LIST_DESCRIPTION.to_owned(),
            table_description: TABLE_DESCRIPTION.to_owned(),
        }
    }
}

/// Placeholder texts shown in reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessageConfig {
    /// Shown when the site has no users.
    pub no_users: String,
    /// Shown when the data source fails.
    pub fetch_error: String,
    /// Role column text for users without roles.
    pub no_role: String,
    /// Date column text for missing or unparsable timestamps.
    pub no_date: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            no_users: NO_USERS.to_owned(),
            fetch_error: FETCH_ERROR.to_owned(),
            no_role: NO_ROLE.to_owned(),
            no_date: NO_DATE.to_owned(),
        }
    }
}

/// Table rendering options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// CSS class of the table element.
    pub class: String,
    /// strftime pattern of the registration column.
    pub date_format: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            class: TABLE_CLASS.to_owned(),
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
        }
    }
}

impl ExtensionConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents or unknown keys,
    /// and any error reported by [`ExtensionConfig::validate`].
    pub fn from_json_str(document: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive the extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Token`] for malformed tokens and
    /// [`ConfigError::Invalid`] for identical tokens, blank messages, or an
    /// unusable date format.
    pub fn validate(&self) -> ConfigResult<()> {
        let tokens = self.user_tokens()?;
        if tokens.list() == tokens.table() {
            return Err(ConfigError::Invalid(
                "list and table tokens must differ",
            ));
        }

        let messages = [
            &self.messages.no_users,
            &self.messages.fetch_error,
            &self.messages.no_role,
            &self.messages.no_date,
        ];
        if messages.iter().any(|text| text.trim().is_empty()) {
            return Err(ConfigError::Invalid("messages cannot be empty"));
        }

        if !is_valid_format(&self.table.date_format) {
            return Err(ConfigError::Invalid(
                "table date format is not a valid strftime pattern",
            ));
        }

        Ok(())
    }

    /// Validated token pair with the configured descriptions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Token`] when either token is malformed.
    pub fn user_tokens(&self) -> ConfigResult<UserTokens> {
        let list = Token::new(self.tokens.list.as_str())?;
        let table = Token::new(self.tokens.table.as_str())?;
        Ok(UserTokens::new(list, table).with_descriptions(
            self.tokens.list_description.as_str(),
            self.tokens.table_description.as_str(),
        ))
    }

    /// Renderer carrying the configured texts.
    #[must_use]
    pub fn renderer(&self) -> UserRenderer {
        UserRenderer::new()
            .with_no_users(self.messages.no_users.as_str())
            .with_no_role(self.messages.no_role.as_str())
            .with_no_date(self.messages.no_date.as_str())
            .with_table_class(self.table.class.as_str())
            .with_date_format(self.table.date_format.as_str())
    }
}
