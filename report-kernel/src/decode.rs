//! Decoding of stored user blobs.

use report_render::UserRecord;
use serde_json::Value;
use tracing::debug;

/// Decodes a stored user list.
///
/// Missing blobs, invalid JSON, and JSON that is not an array all decode to an
/// empty list. Array entries that are not objects are skipped.
#[must_use]
pub fn decode_users(blob: Option<&str>) -> Vec<UserRecord> {
    let Some(blob) = blob.filter(|blob| !blob.trim().is_empty()) else {
        return Vec::new();
    };

    let entries = match serde_json::from_str::<Value>(blob) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            debug!(kind = json_kind(&other), "stored users blob is not an array");
            return Vec::new();
        }
        Err(err) => {
            debug!(%err, "stored users blob is not valid json");
            return Vec::new();
        }
    };

    let total = entries.len();
    let records: Vec<UserRecord> = entries.into_iter().filter_map(UserRecord::from_value).collect();
    if records.len() < total {
        debug!(skipped = total - records.len(), "skipped non-object user entries");
    }
    records
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
