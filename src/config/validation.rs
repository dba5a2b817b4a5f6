//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles the syntactic layer)
//! - Compile every template once so bad routes fail at load, not at bind
//! - Check name uniqueness and constraint value sanity
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the config; nothing is registered
//!   as a side effect

use std::collections::HashSet;

use thiserror::Error;

use crate::pattern::{self, CompileError};

use super::schema::{RouteSpec, RouterConfig};

/// One semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A route's path template failed to compile.
    #[error("route {name:?}: {source}")]
    Path {
        name: String,
        #[source]
        source: CompileError,
    },

    /// A route's host template failed to compile.
    #[error("route {name:?}, host template: {source}")]
    Host {
        name: String,
        #[source]
        source: CompileError,
    },

    /// A group prefix failed to compile.
    #[error("group prefix {prefix:?}: {source}")]
    GroupPrefix {
        prefix: String,
        #[source]
        source: CompileError,
    },

    /// A route with an empty name cannot be bound to a handler.
    #[error("route for path {path:?} has an empty name")]
    EmptyName { path: String },

    /// Route names must be unique; binding is by name.
    #[error("duplicate route name {name:?}")]
    DuplicateName { name: String },

    /// An empty or blank method string.
    #[error("route {name:?} lists an empty method")]
    EmptyMethod { name: String },

    /// Only `http` and `https` are meaningful scheme constraints.
    #[error("route {name:?} lists unsupported scheme {scheme:?}")]
    UnknownScheme { name: String, scheme: String },
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names: HashSet<&str> = HashSet::new();

    for spec in &config.routes {
        validate_route(spec, &mut names, &mut errors);
    }
    for group in &config.groups {
        if let Err(source) = pattern::compile_path(&group.prefix) {
            errors.push(ValidationError::GroupPrefix {
                prefix: group.prefix.clone(),
                source,
            });
        }
        for spec in &group.routes {
            validate_route(spec, &mut names, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route<'a>(
    spec: &'a RouteSpec,
    names: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    if spec.name.is_empty() {
        errors.push(ValidationError::EmptyName {
            path: spec.path.clone(),
        });
    } else if !names.insert(&spec.name) {
        errors.push(ValidationError::DuplicateName {
            name: spec.name.clone(),
        });
    }

    if let Err(source) = pattern::compile_path(&spec.path) {
        errors.push(ValidationError::Path {
            name: spec.name.clone(),
            source,
        });
    }
    if let Some(host) = &spec.host {
        if let Err(source) = pattern::compile_host(host) {
            errors.push(ValidationError::Host {
                name: spec.name.clone(),
                source,
            });
        }
    }

    for method in &spec.methods {
        if method.trim().is_empty() {
            errors.push(ValidationError::EmptyMethod {
                name: spec.name.clone(),
            });
        }
    }
    for scheme in &spec.schemes {
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            errors.push(ValidationError::UnknownScheme {
                name: spec.name.clone(),
                scheme: scheme.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteGroupSpec;

    fn spec(name: &str, path: &str) -> RouteSpec {
        RouteSpec {
            name: name.to_string(),
            path: path.to_string(),
            methods: Vec::new(),
            host: None,
            schemes: Vec::new(),
            prefix: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = RouterConfig {
            routes: vec![spec("a", "/a/{x}"), spec("b", "/b")],
            groups: vec![RouteGroupSpec {
                prefix: "/api".to_string(),
                routes: vec![spec("c", "/items/{id}")],
            }],
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut bad_scheme = spec("s", "/s");
        bad_scheme.schemes = vec!["gopher".to_string()];

        let config = RouterConfig {
            routes: vec![
                spec("", "/nameless"),
                spec("dup", "/one"),
                spec("dup", "/two"),
                spec("broken", "/{title:["),
                bad_scheme,
            ],
            groups: vec![RouteGroupSpec {
                prefix: "no-slash".to_string(),
                routes: vec![],
            }],
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::EmptyName { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::DuplicateName { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::Path { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnknownScheme { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::GroupPrefix { .. })));
    }

    #[test]
    fn test_duplicate_name_across_group_boundary() {
        let config = RouterConfig {
            routes: vec![spec("item", "/items/{id}")],
            groups: vec![RouteGroupSpec {
                prefix: "/api".to_string(),
                routes: vec![spec("item", "/items/{id}")],
            }],
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::DuplicateName { .. }));
    }
}
