//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! RequestDescriptor (method, scheme, host, path)
//!     → table.rs (ordered scan, first match wins)
//!     → constraints.rs (scheme set, host pattern, method set)
//!     → matcher.rs (segment walk, captures, consumed length)
//!     → Return: RouteMatch or ResolveError
//!
//! Registration (setup phase):
//!     template string
//!     → pattern compiler (typed errors, surfaced immediately)
//!     → compiled constraints
//!     → appended to the ordered table, RouteId returned
//! ```
//!
//! # Design Decisions
//! - Routes compile at registration and are immutable afterwards
//! - First registered wins; no specificity scoring, no longest-match
//! - Method-only misses are remembered so a 405 can be told from a 404
//! - Subrouters are owned by their parent route: a strict tree, no cycles

pub mod constraints;
mod matcher;
pub mod shared;
pub mod table;

pub use constraints::RouteConstraints;
pub use shared::SharedTable;
pub use table::{ResolveError, RouteId, RouteMatch, RouteTable};
