//! urlmux — URL-pattern request router.
//!
//! Matches a request descriptor (method, host, scheme, path) against
//! registered route templates with named variable segments, extracts the
//! variables, and dispatches to the matching handler. Sub-routing under
//! path prefixes is hierarchical: a parent route can delegate the
//! unconsumed path suffix to a child table it owns.
//!
//! # Architecture Overview
//!
//! ```text
//!   Setup phase                          Request path
//!   ───────────                          ────────────
//!   template strings                     RequestDescriptor
//!        │                                    │
//!        ▼                                    ▼
//!   ┌─────────┐    ┌─────────────┐      ┌──────────┐
//!   │ pattern │───▶│   routing   │◀─────│ dispatch │
//!   │compiler │    │ table+match │      │          │──▶ handler(ctx)
//!   └─────────┘    └─────────────┘      └──────────┘
//!        ▲                ▲                   │
//!        │                │                   ▼
//!   ┌─────────┐    ┌─────────────┐      tracing events,
//!   │ config  │───▶│ SharedTable │      metrics counters
//!   │ (TOML)  │    │ (hot swap)  │
//!   └─────────┘    └─────────────┘
//! ```
//!
//! Resolution is an ordered scan: the first registered route that
//! satisfies every constraint wins, and a miss is reported as "no route"
//! or, distinctly, "route but wrong method" with the allowed set.
//!
//! # Example
//!
//! ```
//! use urlmux::{handler_fn, Dispatcher, RequestContext, RequestDescriptor};
//! use urlmux::{RouteConstraints, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table.register(
//!     "/books/{title}/page/{page:[0-9]+}",
//!     RouteConstraints::new().methods(["GET"]),
//!     handler_fn(|ctx: &RequestContext<'_>| {
//!         format!(
//!             "book {} page {}",
//!             ctx.var("title").unwrap_or("?"),
//!             ctx.var("page").unwrap_or("?"),
//!         )
//!     }),
//! )?;
//!
//! let dispatcher = Dispatcher::new(table);
//! let response = dispatcher.dispatch(&RequestDescriptor::get("/books/Drums/page/3"))?;
//! assert_eq!(response, "book Drums page 3");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core subsystems
pub mod dispatch;
pub mod pattern;
pub mod request;
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::{bind_table, load_config, parse_config, BindError, ConfigError, RouterConfig};
pub use dispatch::{handler_fn, BoxHandler, Dispatcher, Handler, HandlerFn, RequestContext};
pub use pattern::CompileError;
pub use request::RequestDescriptor;
pub use routing::{
    ResolveError, RouteConstraints, RouteId, RouteMatch, RouteTable, SharedTable,
};
