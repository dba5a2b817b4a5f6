//! Route template compilation subsystem.
//!
//! # Data Flow
//! ```text
//! Template string ("/books/{title}/page/{page:[0-9]+}")
//!     → compiler.rs (split on the separator, parse each piece)
//!     → segment.rs (literal vs variable, compile capture constraints)
//!     → RoutePattern (ordered segments, frozen)
//!
//! Host templates ("{tenant}.example.com") take the same path with `.` as
//! the separator and literal case folded.
//! ```
//!
//! # Design Decisions
//! - Templates compile once, at registration; requests never pay for parsing
//! - Malformed templates abort setup with a typed error, never silently
//! - Capture constraints are anchored regexes over a single segment

pub mod compiler;
pub mod segment;

pub use compiler::{compile_host, compile_path, CompileError, RoutePattern};
pub use segment::Segment;
