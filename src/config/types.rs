use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Key created by `add_new_key` when no settings are available.
pub const DEFAULT_NEW_KEY_TEMPLATE: &str = "Resource";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings of the resource model, read from `.resx-entity.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelSettings {
    /// Key name used by `add_new_key`; `_1`, `_2`, … are appended on collision.
    pub new_key_template: String,

    /// Files grouped into resource entities.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl ModelSettings {
    /// # Errors
    /// - Empty or whitespace-containing key template
    /// - No include pattern
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.new_key_template.is_empty() {
            errors.push(ValidationError::new(
                "newKeyTemplate",
                "The template cannot be empty. Example: \"Resource\"",
            ));
        } else if self.new_key_template.chars().any(char::is_whitespace) {
            errors.push(ValidationError::new(
                "newKeyTemplate",
                format!(
                    "Resource keys cannot contain whitespace: '{}'",
                    self.new_key_template
                ),
            ));
        }

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"**/*.resx\"]",
            ));
        }

        for (index, pattern) in self.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            new_key_template: DEFAULT_NEW_KEY_TEMPLATE.to_string(),
            include_patterns: vec!["**/*.resx".to_string(), "**/*.resw".to_string()],
            exclude_patterns: vec!["**/bin/**".to_string(), "**/obj/**".to_string()],
        }
    }
}
