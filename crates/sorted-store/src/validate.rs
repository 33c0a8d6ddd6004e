use std::path::Path;

use serde_json::Value;
use tracing::warn;

/// Checks the validity of a collection file, or of its already-parsed
/// content.
///
/// With `superficial` set, only filesystem-level facts are checked
/// (exists, is a file, `.json` extension) without opening the file;
/// directory scans use this to avoid parsing every candidate. A deep
/// check additionally requires `id` to be present and `entries` to be
/// present and an array. `data` may be supplied to avoid re-reading a
/// file the caller has already parsed.
pub fn validate_collection(file: &Path, data: Option<&Value>, superficial: bool) -> bool {
    if !file.exists() {
        warn!("file does not exist: {}", file.display());
        return false;
    }
    if !file.is_file() {
        warn!("path is not a file: {}", file.display());
        return false;
    }
    if file.extension().and_then(|e| e.to_str()) != Some("json") {
        warn!("file lacks the .json extension: {}", file.display());
        return false;
    }

    if superficial {
        return true;
    }

    let owned;
    let data = match data {
        Some(value) => value,
        None => {
            let parsed = std::fs::read_to_string(file)
                .ok()
                .and_then(|content| serde_json::from_str::<Value>(&content).ok());
            match parsed {
                Some(value) => {
                    owned = value;
                    &owned
                }
                None => {
                    warn!("could not read file for validation: {}", file.display());
                    return false;
                }
            }
        }
    };

    let Some(object) = data.as_object() else {
        return false;
    };
    if !object.contains_key("id") {
        return false;
    }
    matches!(object.get("entries"), Some(Value::Array(_)))
}

/// Whether a title can safely become a file name on the host filesystem.
/// Validated, not sanitized: an invalid title is an explicit error to the
/// caller, never silently rewritten.
pub fn is_valid_filename(title: &str) -> bool {
    if title.is_empty() || title == "." || title == ".." {
        return false;
    }
    if title.len() > 255 {
        return false;
    }
    !title
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '\0' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
}
