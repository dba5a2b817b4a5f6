//! Handler dispatch.
//!
//! # Responsibilities
//! - Define the handler capability routes point at
//! - Resolve one request and invoke the winning handler
//! - Surface resolution failures to the caller untranslated
//!
//! # Design Decisions
//! - Handlers get a fresh [`RequestContext`] per request; no shared state
//!   is mutated on the request path
//! - The handler's response type is its own business; the dispatcher is
//!   generic over it and never inspects it
//! - Handler failures (panics, error responses) pass through unchanged;
//!   translating router errors into wire responses is the caller's job

use std::collections::HashMap;

use crate::observability::metrics;
use crate::request::RequestDescriptor;
use crate::routing::{ResolveError, RouteId, RouteTable};

/// Per-request view handed to handlers: the request descriptor plus the
/// variables captured by the matched route. Built fresh for every
/// dispatch and dropped when the handler returns.
#[derive(Debug)]
pub struct RequestContext<'a> {
    request: &'a RequestDescriptor,
    captures: HashMap<String, String>,
    route_id: RouteId,
    route_name: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    /// The request being handled.
    pub fn request(&self) -> &RequestDescriptor {
        self.request
    }

    /// The captured value for a named variable segment.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.captures.get(name).map(String::as_str)
    }

    /// All captures, `variable name → percent-decoded value`.
    pub fn vars(&self) -> &HashMap<String, String> {
        &self.captures
    }

    /// Id of the route that matched.
    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    /// Name of the route that matched, if it was registered with one.
    pub fn route_name(&self) -> Option<&str> {
        self.route_name
    }
}

/// The capability a route ultimately points at.
///
/// Implement it directly for handler types that carry state, or wrap a
/// closure with [`handler_fn`].
pub trait Handler: Send + Sync {
    /// Whatever the handler produces; the router never looks inside.
    type Response;

    fn handle(&self, ctx: &RequestContext<'_>) -> Self::Response;
}

/// Adapter turning a closure into a [`Handler`].
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap a closure as a [`Handler`], the `service_fn` pattern:
///
/// ```
/// use urlmux::{handler_fn, RequestContext};
///
/// let hello = handler_fn(|ctx: &RequestContext<'_>| {
///     format!("book: {}", ctx.var("title").unwrap_or("?"))
/// });
/// # let _ = hello;
/// ```
pub fn handler_fn<F, R>(f: F) -> HandlerFn<F>
where
    F: Fn(&RequestContext<'_>) -> R + Send + Sync,
{
    HandlerFn { f }
}

impl<F, R> Handler for HandlerFn<F>
where
    F: Fn(&RequestContext<'_>) -> R + Send + Sync,
{
    type Response = R;

    fn handle(&self, ctx: &RequestContext<'_>) -> R {
        (self.f)(ctx)
    }
}

/// Boxed handler for tables that mix handler types behind one response
/// type.
pub type BoxHandler<R> = Box<dyn Handler<Response = R>>;

impl<R> Handler for BoxHandler<R> {
    type Response = R;

    fn handle(&self, ctx: &RequestContext<'_>) -> R {
        (**self).handle(ctx)
    }
}

/// Resolves requests against an owned table and invokes the winner.
pub struct Dispatcher<H> {
    table: RouteTable<H>,
}

impl<H: Handler> Dispatcher<H> {
    /// Take ownership of a fully built table.
    pub fn new(table: RouteTable<H>) -> Self {
        Self { table }
    }

    /// The table this dispatcher resolves against.
    pub fn table(&self) -> &RouteTable<H> {
        &self.table
    }

    /// Resolve `request` and invoke the matched handler.
    ///
    /// On a miss the specific [`ResolveError`] comes back unchanged; the
    /// caller turns it into a 404 or 405 (with the allowed methods) as it
    /// sees fit.
    pub fn dispatch(&self, request: &RequestDescriptor) -> Result<H::Response, ResolveError> {
        tracing::debug!(
            method = request.method(),
            path = request.path(),
            "dispatching request"
        );

        let matched = match self.table.resolve(request) {
            Ok(matched) => matched,
            Err(error) => {
                tracing::warn!(
                    method = request.method(),
                    path = request.path(),
                    %error,
                    "no route for request"
                );
                metrics::record_resolution(outcome_label(&error), None);
                return Err(error);
            }
        };
        metrics::record_resolution("matched", matched.route_name);

        let ctx = RequestContext {
            request,
            captures: matched.captures,
            route_id: matched.route_id,
            route_name: matched.route_name,
        };
        Ok(matched.handler.handle(&ctx))
    }
}

fn outcome_label(error: &ResolveError) -> &'static str {
    match error {
        ResolveError::NotFound { .. } => "not_found",
        ResolveError::MethodNotAllowed { .. } => "method_not_allowed",
    }
}
