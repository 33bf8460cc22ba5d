//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use serde_json::Value;

/// Validate a namespace.
///
/// Delegates to [`crate::config::validate_namespace`] so the rules live in
/// one place.
pub fn validate_namespace(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    crate::config::validate_namespace(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

/// Validate a node id argument.
///
/// Ids are opaque to the engine, so only blank input and embedded
/// whitespace are rejected.
pub fn validate_node_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Node ID cannot be empty".to_string());
    }

    if s.chars().any(char::is_whitespace) {
        return Err(format!("Node ID '{}' cannot contain whitespace", s));
    }

    Ok(s.to_string())
}

/// Validate a node name.
pub fn validate_name(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Node name cannot be empty".to_string());
    }
    Ok(s.to_string())
}

/// Parse a `key=value` metadata entry.
///
/// The value is stored as a JSON string; the key must be non-blank.
pub fn parse_metadata_entry(s: &str) -> Result<(String, Value), String> {
    let Some((key, value)) = s.split_once('=') else {
        return Err(format!(
            "Invalid metadata '{}'. Expected format: key=value",
            s
        ));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err("Metadata key cannot be empty".to_string());
    }

    Ok((key.to_string(), Value::String(value.trim().to_string())))
}
