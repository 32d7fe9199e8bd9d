//! Plain text and HTML table renderings of a user list.

use std::fmt::Write as _;

use tracing::debug;

use crate::date::{DEFAULT_DATE_FORMAT, format_date, parse_registration_date};
use crate::escape::escape_html;
use crate::record::UserRecord;

/// Text substituted when a site has no users.
pub const NO_USERS: &str = "No users found";
/// Role column text for users without any role.
pub const NO_ROLE: &str = "No role";
/// Date column text for missing or unparsable timestamps.
pub const NO_DATE: &str = "N/A";
/// CSS class of the rendered table.
pub const TABLE_CLASS: &str = "mainwp-users-table";

const TABLE_STYLE: &str = "width: 100%; border-collapse: collapse; margin: 15px 0;";
const HEAD_ROW_STYLE: &str = "background-color: #f8f9fa;";
const TH_STYLE: &str = "padding: 8px; border: 1px solid #dee2e6; text-align: left;";
const TD_STYLE: &str = "padding: 8px; border: 1px solid #dee2e6;";
const HEADERS: [&str; 4] = ["Username", "Email", "Role(s)", "Registration Date"];

/// Renders user records with configurable sentinel texts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRenderer {
    no_users: String,
    no_role: String,
    no_date: String,
    table_class: String,
    date_format: String,
}

impl Default for UserRenderer {
    fn default() -> Self {
        Self {
            no_users: NO_USERS.to_owned(),
            no_role: NO_ROLE.to_owned(),
            no_date: NO_DATE.to_owned(),
            table_class: TABLE_CLASS.to_owned(),
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
        }
    }
}

impl UserRenderer {
    /// Creates a renderer with the default texts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text used in place of an empty user list.
    #[must_use]
    pub fn with_no_users(mut self, text: impl Into<String>) -> Self {
        self.no_users = text.into();
        self
    }

    /// Sets the role sentinel.
    #[must_use]
    pub fn with_no_role(mut self, text: impl Into<String>) -> Self {
        self.no_role = text.into();
        self
    }

    /// Sets the registration date sentinel.
    #[must_use]
    pub fn with_no_date(mut self, text: impl Into<String>) -> Self {
        self.no_date = text.into();
        self
    }

    /// Sets the CSS class of the table element.
    #[must_use]
    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = class.into();
        self
    }

    /// Sets the strftime pattern of the registration column.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Text used in place of an empty user list.
    #[must_use]
    pub fn no_users(&self) -> &str {
        &self.no_users
    }

    /// One `username (email) - roles` line per record.
    #[must_use]
    pub fn render_list(&self, records: &[UserRecord]) -> String {
        if records.is_empty() {
            return self.no_users.clone();
        }

        let mut out = String::new();
        for record in records {
            let roles = record.roles();
            let roles = roles.as_deref().unwrap_or(self.no_role.as_str());
            let _ = writeln!(
                out,
                "{} ({}) - {}",
                escape_html(&record.username()),
                escape_html(&record.email()),
                escape_html(roles),
            );
        }
        debug!(records = records.len(), "rendered user list");
        out.trim_end().to_owned()
    }

    /// HTML table with a fixed header row and one row per record.
    #[must_use]
    pub fn render_table(&self, records: &[UserRecord]) -> String {
        if records.is_empty() {
            return self.no_users.clone();
        }

        let mut out = String::new();
        let _ = write!(
            out,
            r#"<table class="{}" style="{TABLE_STYLE}"><thead><tr style="{HEAD_ROW_STYLE}">"#,
            escape_html(&self.table_class),
        );
        for header in HEADERS {
            let _ = write!(out, r#"<th style="{TH_STYLE}">{header}</th>"#);
        }
        out.push_str("</tr></thead><tbody>");

        for record in records {
            let roles = record.roles();
            let cells = [
                record.username(),
                record.email(),
                roles.unwrap_or_else(|| self.no_role.clone()),
                self.registration_cell(record),
            ];
            out.push_str("<tr>");
            for cell in &cells {
                let _ = write!(out, r#"<td style="{TD_STYLE}">{}</td>"#, escape_html(cell));
            }
            out.push_str("</tr>");
        }

        out.push_str("</tbody></table>");
        debug!(records = records.len(), "rendered user table");
        out
    }

    fn registration_cell(&self, record: &UserRecord) -> String {
        record
            .registered()
            .as_deref()
            .and_then(parse_registration_date)
            .and_then(|date| format_date(date, &self.date_format))
            .unwrap_or_else(|| self.no_date.clone())
    }
}

/// Renders `records` as a text list with the default texts.
#[must_use]
pub fn render_as_list(records: &[UserRecord]) -> String {
    UserRenderer::default().render_list(records)
}

/// Renders `records` as an HTML table with the default texts.
#[must_use]
pub fn render_as_table(records: &[UserRecord]) -> String {
    UserRenderer::default().render_table(records)
}
