//! Configuration management for the extension.
//!
//! Every key is optional; omitted keys take the texts and tokens the host
//! dashboard ships with.

#![warn(missing_docs, clippy::pedantic)]

pub mod loader;
pub mod schema;

pub use loader::load_from_path;
pub use schema::{ConfigError, ConfigResult, ExtensionConfig, MessageConfig, TableConfig, TokenConfig};
