//! Configuration file loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::schema::ExtensionConfig;

/// Reads, parses, and validates a JSON configuration file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or its contents fail
/// [`ExtensionConfig::from_json_str`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ExtensionConfig> {
    let path = path.as_ref();
    let document = fs::read_to_string(path)
        .with_context(|| format!("reading configuration from {}", path.display()))?;
    let config = ExtensionConfig::from_json_str(&document)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    info!(path = %path.display(), "loaded extension configuration");
    Ok(config)
}
