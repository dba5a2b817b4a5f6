//! Route table and resolution.
//!
//! # Responsibilities
//! - Keep registered routes in insertion order
//! - Resolve a request to the first matching route's handler and captures
//! - Delegate unconsumed path suffixes to subrouter child tables
//! - Distinguish "no route" from "route, wrong method"
//!
//! # Design Decisions
//! - First registered wins; there is no specificity or longest-match
//!   scoring, so callers shadow general routes by registering specific
//!   ones earlier
//! - The table is generic over an opaque handler payload; it never calls
//!   the handler itself
//! - Registration is a setup-phase operation; once serving starts the
//!   table is treated as immutable (see [`SharedTable`] for hot swaps)
//!
//! [`SharedTable`]: super::shared::SharedTable

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use thiserror::Error;

use crate::pattern::{self, CompileError, RoutePattern};
use crate::request::RequestDescriptor;

use super::constraints::{CompiledConstraints, RouteConstraints};
use super::matcher::{self, PathMode};

/// Identifier handed back by registration: the route's index within the
/// issuing table. Stable for the table's lifetime; not unique across
/// parent and child tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteId(pub usize);

/// Why resolution failed. Both variants are per-request and recoverable;
/// the caller decides the wire-level response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No route matched the request at all.
    #[error("no route matches {path:?}")]
    NotFound { path: String },

    /// At least one route matched the path, host, and scheme, but none of
    /// those routes admitted the method. `allowed` is the sorted union of
    /// the methods that would have been accepted, ready for an `Allow`
    /// header.
    #[error("method {method} not allowed (allowed: {})", .allowed.join(", "))]
    MethodNotAllowed {
        method: String,
        allowed: Vec<String>,
    },
}

/// What a matched route resolves to.
enum RouteTarget<H> {
    /// Invoke the handler; the pattern must consume the whole path.
    Handler(H),
    /// Invoke the handler; the pattern consumes a leading portion and the
    /// handler sees the request regardless of what follows.
    Prefix(H),
    /// Delegate the unconsumed suffix to a child table.
    Subrouter(RouteTable<H>),
}

struct Route<H> {
    id: RouteId,
    name: Option<String>,
    template: String,
    pattern: RoutePattern,
    constraints: CompiledConstraints,
    target: RouteTarget<H>,
}

/// Ordered route collection; insertion order is priority order.
///
/// Build it single-threaded during setup, then share it immutably; every
/// resolution is a pure read.
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

/// A resolved route: the handler to invoke plus the extracted variables.
///
/// Constructed fresh per request and discarded afterwards; nothing in it
/// is cached or shared across requests.
pub struct RouteMatch<'t, H> {
    /// The matched route's handler.
    pub handler: &'t H,
    /// Id of the matched route within the deepest table that matched it.
    pub route_id: RouteId,
    /// Name given at registration, if any.
    pub route_name: Option<&'t str>,
    /// `variable name → percent-decoded capture`, host and path merged.
    pub captures: HashMap<String, String>,
}

/// Method sets seen by routes that matched everything but the method.
/// Empty means a plain miss.
type MissedMethods = BTreeSet<String>;

impl<H> RouteTable<H> {
    /// An empty table.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Number of routes registered directly in this table.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Register an exact-match route.
    ///
    /// The route matches when its pattern consumes the request path
    /// entirely and every supplied constraint passes. Compilation errors
    /// surface here, never at request time.
    pub fn register(
        &mut self,
        template: &str,
        constraints: RouteConstraints,
        handler: H,
    ) -> Result<RouteId, CompileError> {
        self.push_route(None, template, constraints, RouteTarget::Handler(handler))
    }

    /// [`register`](Self::register) with a route name attached for logs,
    /// metrics labels, and config binding.
    pub fn register_named(
        &mut self,
        name: impl Into<String>,
        template: &str,
        constraints: RouteConstraints,
        handler: H,
    ) -> Result<RouteId, CompileError> {
        self.push_route(
            Some(name.into()),
            template,
            constraints,
            RouteTarget::Handler(handler),
        )
    }

    /// Register a prefix route: the handler takes any request whose path
    /// starts with the template on a segment boundary.
    pub fn register_prefix(
        &mut self,
        template: &str,
        constraints: RouteConstraints,
        handler: H,
    ) -> Result<RouteId, CompileError> {
        self.push_route(None, template, constraints, RouteTarget::Prefix(handler))
    }

    /// [`register_prefix`](Self::register_prefix) with a route name.
    pub fn register_prefix_named(
        &mut self,
        name: impl Into<String>,
        template: &str,
        constraints: RouteConstraints,
        handler: H,
    ) -> Result<RouteId, CompileError> {
        self.push_route(
            Some(name.into()),
            template,
            constraints,
            RouteTarget::Prefix(handler),
        )
    }

    /// Create a child table scoped under `prefix` and return a handle for
    /// registering its routes. The parent owns the child; resolution
    /// delegates the path suffix left over after the prefix match.
    ///
    /// The prefix may itself contain variables; their captures merge into
    /// whatever the child routes capture.
    pub fn subrouter(&mut self, prefix: &str) -> Result<&mut RouteTable<H>, CompileError> {
        self.push_route(
            None,
            prefix,
            RouteConstraints::new(),
            RouteTarget::Subrouter(RouteTable::new()),
        )?;
        match self.routes.last_mut().map(|route| &mut route.target) {
            Some(RouteTarget::Subrouter(child)) => Ok(child),
            _ => unreachable!("subrouter entry was just pushed"),
        }
    }

    fn push_route(
        &mut self,
        name: Option<String>,
        template: &str,
        constraints: RouteConstraints,
        target: RouteTarget<H>,
    ) -> Result<RouteId, CompileError> {
        let pattern = pattern::compile_path(template)?;
        let constraints = constraints.compile()?;

        // Host and path variables land in one captures map, so a name may
        // not appear in both templates of a single route.
        for host_var in constraints.host_var_names() {
            if pattern.var_names().any(|path_var| path_var == host_var) {
                return Err(CompileError::DuplicateVariable {
                    name: host_var.to_string(),
                });
            }
        }

        let id = RouteId(self.routes.len());
        tracing::debug!(
            route = id.0,
            name = name.as_deref().unwrap_or(""),
            template,
            "route registered"
        );
        self.routes.push(Route {
            id,
            name,
            template: template.to_string(),
            pattern,
            constraints,
            target,
        });
        Ok(id)
    }

    /// Resolve a request to the first route that satisfies all of its
    /// constraints, in registration order.
    ///
    /// Pure and idempotent: the same table and request always produce the
    /// same result, and nothing in the table is mutated.
    pub fn resolve(&self, request: &RequestDescriptor) -> Result<RouteMatch<'_, H>, ResolveError> {
        match self.resolve_suffix(request, request.path()) {
            Ok(found) => Ok(found),
            Err(missed) if missed.is_empty() => Err(ResolveError::NotFound {
                path: request.path().to_string(),
            }),
            Err(missed) => Err(ResolveError::MethodNotAllowed {
                method: request.method().to_ascii_uppercase(),
                allowed: missed.into_iter().collect(),
            }),
        }
    }

    fn resolve_suffix<'t>(
        &'t self,
        request: &RequestDescriptor,
        path: &str,
    ) -> Result<RouteMatch<'t, H>, MissedMethods> {
        let mut missed = MissedMethods::new();

        for route in &self.routes {
            let Some(host_captures) = route.constraints.admit_target(request) else {
                continue;
            };

            let mode = match route.target {
                RouteTarget::Handler(_) => PathMode::Exact,
                RouteTarget::Prefix(_) | RouteTarget::Subrouter(_) => PathMode::Prefix,
            };
            let Some(path_match) = matcher::match_path(&route.pattern, path, mode) else {
                continue;
            };

            if !route.constraints.admits_method(request.method()) {
                missed.extend(route.constraints.methods.iter().cloned());
                continue;
            }

            match &route.target {
                RouteTarget::Handler(handler) | RouteTarget::Prefix(handler) => {
                    let mut captures =
                        HashMap::with_capacity(host_captures.len() + path_match.captures.len());
                    captures.extend(host_captures);
                    captures.extend(path_match.captures);
                    tracing::debug!(
                        route = route.id.0,
                        name = route.name.as_deref().unwrap_or(""),
                        template = %route.template,
                        "route matched"
                    );
                    return Ok(RouteMatch {
                        handler,
                        route_id: route.id,
                        route_name: route.name.as_deref(),
                        captures,
                    });
                }
                RouteTarget::Subrouter(child) => {
                    let suffix = &path[path_match.consumed..];
                    match child.resolve_suffix(request, suffix) {
                        Ok(mut found) => {
                            // The child's captures win a name collision,
                            // like the innermost scope they are.
                            for (name, value) in
                                host_captures.into_iter().chain(path_match.captures)
                            {
                                found.captures.entry(name).or_insert(value);
                            }
                            return Ok(found);
                        }
                        Err(child_missed) => {
                            // A subrouter miss does not stop the parent
                            // scan, but its method misses still count.
                            missed.extend(child_missed);
                        }
                    }
                }
            }
        }

        Err(missed)
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for RouteTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let templates: Vec<&str> = self
            .routes
            .iter()
            .map(|route| route.template.as_str())
            .collect();
        f.debug_struct("RouteTable")
            .field("routes", &templates)
            .finish()
    }
}

impl<H> fmt::Debug for RouteMatch<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("route_id", &self.route_id)
            .field("route_name", &self.route_name)
            .field("captures", &self.captures)
            .finish_non_exhaustive()
    }
}
