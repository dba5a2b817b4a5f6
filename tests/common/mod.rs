//! Shared utilities for integration tests.

use std::sync::Once;

use urlmux::{handler_fn, BoxHandler, RequestContext};

static INIT: Once = Once::new();

/// Install a tracing subscriber once so `RUST_LOG=urlmux=debug cargo test`
/// shows the router's events. Safe to call from every test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "urlmux=warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A boxed handler that answers with `label` plus every capture, in sorted
/// order, e.g. `book-page title=Drums page=3`.
#[allow(dead_code)]
pub fn echo_handler(label: &'static str) -> BoxHandler<String> {
    Box::new(handler_fn(move |ctx: &RequestContext<'_>| {
        let mut pairs: Vec<String> = ctx
            .vars()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        pairs.sort();
        if pairs.is_empty() {
            label.to_string()
        } else {
            format!("{label} {}", pairs.join(" "))
        }
    }))
}
