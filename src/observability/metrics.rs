//! Metrics collection.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolution attempts by outcome
//!   (`matched`, `not_found`, `method_not_allowed`) and route name
//!
//! # Design Decisions
//! - Only the `metrics` facade is used; installing a recorder/exporter is
//!   the host application's call, and without one these are no-ops
//! - The route label uses the registered route name, never the raw path,
//!   to keep label cardinality bounded

use metrics::counter;

/// Count one resolution attempt.
pub fn record_resolution(outcome: &'static str, route: Option<&str>) {
    let route = route.unwrap_or("unnamed").to_string();
    counter!("router_resolutions_total", "outcome" => outcome, "route" => route).increment(1);
}
