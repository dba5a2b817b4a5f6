//! Binding configured routes to handlers.
//!
//! # Responsibilities
//! - Turn a validated [`RouterConfig`] plus a name→handler registry into a
//!   ready [`RouteTable`]
//! - Fail loudly when a configured route has no handler to point at
//!
//! # Design Decisions
//! - Binding consumes the registry; a handler can back at most one route
//! - Leftover handlers are tolerated with a warning, so applications can
//!   ship handlers ahead of enabling their routes

use std::collections::HashMap;

use thiserror::Error;

use crate::pattern::CompileError;
use crate::routing::RouteTable;

use super::schema::{RouteSpec, RouterConfig};

/// Error type for handler binding.
#[derive(Debug, Error)]
pub enum BindError {
    /// A configured route has no handler registered under its name.
    #[error("no handler supplied for route {name:?}")]
    MissingHandler { name: String },

    /// A template failed to compile; only reachable when binding a config
    /// that skipped [`validate_config`](super::validation::validate_config).
    #[error("route {name:?}: {source}")]
    Compile {
        name: String,
        #[source]
        source: CompileError,
    },
}

/// Build a route table from a configuration and a handler registry.
///
/// Top-level routes register first, then each group as one prefix-scoped
/// subrouter, everything in file order; file order is match priority.
pub fn bind_table<H>(
    config: &RouterConfig,
    mut handlers: HashMap<String, H>,
) -> Result<RouteTable<H>, BindError> {
    let mut table = RouteTable::new();

    for spec in &config.routes {
        bind_route(&mut table, spec, &mut handlers)?;
    }
    for group in &config.groups {
        let child = table
            .subrouter(&group.prefix)
            .map_err(|source| BindError::Compile {
                name: group.prefix.clone(),
                source,
            })?;
        for spec in &group.routes {
            bind_route(child, spec, &mut handlers)?;
        }
    }

    if !handlers.is_empty() {
        let unused: Vec<String> = handlers.keys().cloned().collect();
        tracing::warn!(handlers = ?unused, "handlers without a configured route");
    }

    Ok(table)
}

fn bind_route<H>(
    table: &mut RouteTable<H>,
    spec: &RouteSpec,
    handlers: &mut HashMap<String, H>,
) -> Result<(), BindError> {
    let Some(handler) = handlers.remove(&spec.name) else {
        return Err(BindError::MissingHandler {
            name: spec.name.clone(),
        });
    };

    let constraints = spec.constraints();
    let registered = if spec.prefix {
        table.register_prefix_named(&spec.name, &spec.path, constraints, handler)
    } else {
        table.register_named(&spec.name, &spec.path, constraints, handler)
    };
    registered.map_err(|source| BindError::Compile {
        name: spec.name.clone(),
        source,
    })?;
    Ok(())
}
