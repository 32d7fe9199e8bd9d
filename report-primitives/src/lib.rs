//! Core shared types for the all-users report token extension.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod site;
mod token;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Identifier and descriptor of a managed site.
pub use site::{SiteDescriptor, SiteId};
/// Validated report placeholder tokens.
pub use token::{ALL_USERS, ALL_USERS_TABLE, Token};
