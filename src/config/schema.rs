//! Route configuration schema.
//!
//! This module defines the declarative route table structure. All types
//! derive Serde traits for deserialization from config files; handlers are
//! bound to the configured routes by name at startup (see `bind.rs`).

use serde::{Deserialize, Serialize};

use crate::routing::RouteConstraints;

/// Root of a declarative router configuration.
///
/// ```toml
/// [[routes]]
/// name = "book-page"
/// path = "/books/{title}/page/{page:[0-9]+}"
/// methods = ["GET"]
///
/// [[groups]]
/// prefix = "/api"
///
///   [[groups.routes]]
///   name = "api-item"
///   path = "/items/{id}"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Top-level routes, in priority order.
    pub routes: Vec<RouteSpec>,

    /// Prefix-scoped route groups, each becoming one subrouter. Groups
    /// register after the top-level routes, in file order.
    pub groups: Vec<RouteGroupSpec>,
}

/// One configured route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteSpec {
    /// Route identifier; binds the route to a handler and labels logs and
    /// metrics. Must be unique across the whole file.
    pub name: String,

    /// Path template, e.g. `/books/{title}/page/{page:[0-9]+}`.
    pub path: String,

    /// Allowed HTTP methods (empty = any).
    #[serde(default)]
    pub methods: Vec<String>,

    /// Host template to require, e.g. `{tenant}.example.com`.
    #[serde(default)]
    pub host: Option<String>,

    /// Allowed URI schemes (empty = any).
    #[serde(default)]
    pub schemes: Vec<String>,

    /// Match the path as a prefix instead of exactly.
    #[serde(default)]
    pub prefix: bool,
}

impl RouteSpec {
    /// The constraint set this spec describes.
    pub fn constraints(&self) -> RouteConstraints {
        let mut constraints = RouteConstraints::new()
            .methods(self.methods.iter().cloned())
            .schemes(self.schemes.iter().cloned());
        if let Some(host) = &self.host {
            constraints = constraints.host(host.clone());
        }
        constraints
    }
}

/// A group of routes delegated under a shared path prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteGroupSpec {
    /// Path prefix the subrouter is scoped to; may contain variables.
    pub prefix: String,

    /// The group's routes, matched against the path suffix left over
    /// after the prefix.
    pub routes: Vec<RouteSpec>,
}
