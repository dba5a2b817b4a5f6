//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registration and resolution produce:
//!     → tracing events at the call sites (structured fields, no subscriber
//!       installed here; the host application picks one)
//!     → metrics.rs (resolution counters via the `metrics` facade)
//! ```
//!
//! # Design Decisions
//! - The library emits, the application collects: no subscriber, recorder,
//!   or exporter is ever installed from this crate
//! - Event fields carry route ids and names, not raw request paths, so
//!   log volume and metric cardinality stay bounded

pub mod metrics;
