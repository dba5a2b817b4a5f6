//! Hot-swappable table snapshots.
//!
//! # Responsibilities
//! - Give concurrent readers lock-free access to an immutable table
//! - Let a single writer replace the table atomically
//!
//! # Design Decisions
//! - Readers resolve against a snapshot `Arc`; a swap landing mid-request
//!   never changes what that request observes
//! - Writers build a complete replacement table off to the side; there is
//!   no in-place mutation of a table readers can see
//! - The old snapshot is freed when its last reader drops it

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::table::RouteTable;

/// Single-writer, multi-reader handle over an immutable route table.
///
/// ```
/// use urlmux::{RequestDescriptor, RouteConstraints, RouteTable, SharedTable};
///
/// let mut table = RouteTable::new();
/// table.register("/books/{title}", RouteConstraints::new(), "book")?;
/// let shared = SharedTable::new(table);
///
/// // Request path: take a snapshot, resolve against it.
/// let snapshot = shared.snapshot();
/// let matched = snapshot.resolve(&RequestDescriptor::get("/books/Go"))?;
/// assert_eq!(matched.captures["title"], "Go");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SharedTable<H> {
    inner: ArcSwap<RouteTable<H>>,
}

impl<H> SharedTable<H> {
    /// Wrap an already-built table.
    pub fn new(table: RouteTable<H>) -> Self {
        Self {
            inner: ArcSwap::from_pointee(table),
        }
    }

    /// The current snapshot. Hold the `Arc` for the duration of one
    /// request; resolution against it is unaffected by concurrent swaps.
    pub fn snapshot(&self) -> Arc<RouteTable<H>> {
        self.inner.load_full()
    }

    /// Atomically replace the table and return the one it displaced.
    pub fn swap(&self, table: RouteTable<H>) -> Arc<RouteTable<H>> {
        tracing::info!(routes = table.len(), "route table swapped");
        self.inner.swap(Arc::new(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestDescriptor;
    use crate::routing::constraints::RouteConstraints;

    fn table_with(handler: &'static str) -> RouteTable<&'static str> {
        let mut table = RouteTable::new();
        table
            .register("/books/{title}", RouteConstraints::new(), handler)
            .unwrap();
        table
    }

    #[test]
    fn test_snapshot_survives_swap() {
        let shared = SharedTable::new(table_with("old"));
        let before = shared.snapshot();

        let displaced = shared.swap(table_with("new"));
        assert_eq!(displaced.len(), 1);

        let request = RequestDescriptor::get("/books/Go");
        // The held snapshot still resolves to the old handler, the fresh
        // snapshot to the new one.
        assert_eq!(*before.resolve(&request).unwrap().handler, "old");
        assert_eq!(*shared.snapshot().resolve(&request).unwrap().handler, "new");
    }
}
