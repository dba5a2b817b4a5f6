//! Incoming request descriptor.
//!
//! # Responsibilities
//! - Carry the facts matching reads: method, scheme, host, path
//! - Stay read-only for the whole resolution pass
//!
//! # Design Decisions
//! - The router never parses wire data; the surrounding HTTP layer fills
//!   this in from whatever request type it uses
//! - The path is carried raw (undecoded); only variable captures are
//!   percent-decoded, by the matcher

/// The request facts the router matches on.
///
/// Constructed by the caller once per request and handed to
/// [`resolve`](crate::routing::RouteTable::resolve) or
/// [`dispatch`](crate::dispatch::Dispatcher::dispatch) by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: String,
    scheme: String,
    host: String,
    path: String,
}

impl RequestDescriptor {
    /// Describe a request.
    ///
    /// `method` and `scheme` are compared case-insensitively against route
    /// constraints; `host` has any `:port` suffix stripped before host
    /// patterns run; `path` is matched as given.
    pub fn new(
        method: impl Into<String>,
        scheme: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
        }
    }

    /// Shorthand for a plain `GET` over `http` with an empty host.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", "http", "", path)
    }

    /// HTTP method, as supplied by the caller.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// URI scheme (`http` or `https` in practice).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host header value, possibly including a port.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Raw request path, beginning with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }
}
