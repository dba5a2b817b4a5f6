//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, every error reported)
//!     → RouterConfig (validated, immutable)
//!     → bind.rs (+ name→handler registry)
//!     → RouteTable, ready for a Dispatcher or SharedTable
//! ```
//!
//! # Design Decisions
//! - Config declares routes; code supplies handlers — the two meet by
//!   route name at bind time
//! - A config is validated as a whole before anything registers, so a
//!   broken file never half-populates a table
//! - Reload is snapshot-based: load + bind a fresh table, then swap it
//!   into a [`SharedTable`](crate::routing::SharedTable)

pub mod bind;
pub mod loader;
pub mod schema;
pub mod validation;

pub use bind::{bind_table, BindError};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{RouteGroupSpec, RouteSpec, RouterConfig};
pub use validation::{validate_config, ValidationError};
