//! Path and host matching.
//!
//! # Responsibilities
//! - Walk a compiled pattern against `/`-split path segments
//! - Report captures (percent-decoded) and the consumed byte length
//! - Match host patterns with the port stripped, case-insensitively
//!
//! # Design Decisions
//! - Literals compare against the raw path; only captures are decoded
//! - Capture constraints also run on the raw segment, so the constraint
//!   governs what may appear on the wire
//! - Prefix matches always end on a segment boundary, so the prefix
//!   `/books` can never claim `/bookstore`
//! - Matching is pure; ordering and priority live in the route table

use percent_encoding::percent_decode_str;

use crate::pattern::{RoutePattern, Segment};

/// How much of the path a pattern must account for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathMode {
    /// Every path segment must be consumed.
    Exact,
    /// Matching stops once the pattern is exhausted; the rest of the path
    /// is left for a delegate.
    Prefix,
}

/// Outcome of a successful path walk.
#[derive(Debug)]
pub(crate) struct PathMatch {
    /// `name → percent-decoded value`, in segment order.
    pub(crate) captures: Vec<(String, String)>,
    /// Bytes of the path accounted for; the unconsumed suffix starts here.
    pub(crate) consumed: usize,
}

/// Walk `pattern` over `path`.
///
/// The path is split on `/` with one leading slash tolerated, so `/a/b`
/// yields the segments `a`, `b` and a trailing slash yields a final empty
/// segment, which no literal or variable accepts. The root pattern (zero
/// segments) consumes nothing in prefix mode.
pub(crate) fn match_path(pattern: &RoutePattern, path: &str, mode: PathMode) -> Option<PathMatch> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let lead = path.len() - trimmed.len();
    let parts: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    };

    let segments = pattern.segments();
    if parts.len() < segments.len() {
        return None;
    }
    if mode == PathMode::Exact && parts.len() != segments.len() {
        return None;
    }

    let mut captures = Vec::new();
    let mut consumed = 0;
    for (index, (segment, part)) in segments.iter().zip(&parts).enumerate() {
        match segment {
            Segment::Literal(text) => {
                if text != part {
                    return None;
                }
            }
            Segment::Variable(var) => {
                if !var.accepts(part) {
                    return None;
                }
                captures.push((var.name().to_string(), decode(part)));
            }
        }
        consumed = if index == 0 {
            lead + part.len()
        } else {
            consumed + 1 + part.len()
        };
    }

    Some(PathMatch { captures, consumed })
}

/// Match a host pattern against a Host header value.
///
/// The port is stripped and the host lowercased first; the pattern's
/// literal labels were lowercased at compile time. Label captures are
/// recorded as-is (host labels carry no percent-encoding).
pub(crate) fn match_host(pattern: &RoutePattern, host: &str) -> Option<Vec<(String, String)>> {
    let bare = host.split(':').next().unwrap_or(host);
    let bare = bare.to_ascii_lowercase();
    let labels: Vec<&str> = bare.split('.').collect();

    let segments = pattern.segments();
    if labels.len() != segments.len() {
        return None;
    }

    let mut captures = Vec::new();
    for (segment, label) in segments.iter().zip(&labels) {
        match segment {
            Segment::Literal(text) => {
                if text != label {
                    return None;
                }
            }
            Segment::Variable(var) => {
                if !var.accepts(label) {
                    return None;
                }
                captures.push((var.name().to_string(), (*label).to_string()));
            }
        }
    }

    Some(captures)
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
