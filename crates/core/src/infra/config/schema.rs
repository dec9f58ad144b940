use std::path::Path;

use tokio::fs;

use super::ConfigError;

/// Most schema violations reported in one error.
const MAX_REPORTED: usize = 5;

/// Validates TOML text against the JSON schema stored at `schema_path`.
pub(crate) async fn check_against_schema(
    schema_path: &Path,
    toml_text: &str,
    context: &str,
) -> Result<(), ConfigError> {
    let schema_text = fs::read_to_string(schema_path).await.map_err(|e| {
        ConfigError::Invalid(format!("schema file missing at {}: {e}", schema_path.display()))
    })?;
    let schema: serde_json::Value = serde_json::from_str(&schema_text)
        .map_err(|e| ConfigError::Invalid(format!("schema {}: {e}", schema_path.display())))?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| ConfigError::Invalid(format!("schema compile error: {e}")))?;

    // TOML has no null, so every TOML document maps cleanly onto JSON.
    let document: toml::Value = toml::from_str(toml_text)?;
    let instance = serde_json::to_value(document)
        .map_err(|e| ConfigError::Invalid(format!("{context}: {e}")))?;

    let violations: Vec<String> = validator
        .iter_errors(&instance)
        .take(MAX_REPORTED)
        .map(|e| e.to_string())
        .collect();
    if violations.is_empty() {
        return Ok(());
    }
    Err(ConfigError::Invalid(format!(
        "schema validation failed for {context}: {}",
        violations.join("; ")
    )))
}
