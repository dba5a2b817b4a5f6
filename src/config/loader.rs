//! Configuration loading from disk.
//!
//! # Responsibilities
//! - Read, parse, and validate a TOML route configuration
//! - Keep the three failure layers (IO, syntax, semantics) distinguishable

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::schema::RouterConfig;
use super::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for the schema.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but is semantically wrong; every problem is listed.
    #[error("validation failed: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate a route configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate a TOML document already in memory.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    tracing::debug!(
        routes = config.routes.len(),
        groups = config.groups.len(),
        "route configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_document() {
        let config = parse_config(
            r#"
            [[routes]]
            name = "book"
            path = "/books/{title}"
            "#,
        )
        .unwrap();
        assert_eq!(config.routes.len(), 1);
    }

    #[test]
    fn test_parse_error_is_not_validation() {
        let err = parse_config("routes = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors_surface_together() {
        let err = parse_config(
            r#"
            [[routes]]
            name = ""
            path = "relative"
            "#,
        )
        .unwrap_err();
        let ConfigError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 2);
    }
}
