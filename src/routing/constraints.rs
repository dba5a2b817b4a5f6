//! Route constraints beyond the path.
//!
//! # Responsibilities
//! - Collect the caller's method / host / scheme restrictions
//! - Compile the host template at registration time
//! - Gate candidate routes during resolution
//!
//! # Design Decisions
//! - An empty set means "no restriction", matching the usual router contract
//! - Methods and schemes normalize at construction (uppercase / lowercase),
//!   so the hot path is a plain comparison
//! - Host and scheme gate a route before its method is considered; only a
//!   route that passed everything but the method counts toward a 405

use crate::pattern::{self, CompileError, RoutePattern};
use crate::request::RequestDescriptor;

use super::matcher;

/// Declarative constraint set supplied at registration time.
///
/// ```
/// use urlmux::RouteConstraints;
///
/// let constraints = RouteConstraints::new()
///     .methods(["GET", "HEAD"])
///     .host("{tenant}.example.com")
///     .schemes(["https"]);
/// # let _ = constraints;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteConstraints {
    methods: Vec<String>,
    host: Option<String>,
    schemes: Vec<String>,
}

impl RouteConstraints {
    /// No restrictions: any method, host, and scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given HTTP methods. Empty means any.
    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods
            .into_iter()
            .map(|method| method.into().to_ascii_uppercase())
            .collect();
        self
    }

    /// Require the request host to match a template (same grammar as path
    /// templates, over `.`-separated labels). Compiled at registration.
    pub fn host(mut self, template: impl Into<String>) -> Self {
        self.host = Some(template.into());
        self
    }

    /// Restrict to the given URI schemes. Empty means any.
    pub fn schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemes = schemes
            .into_iter()
            .map(|scheme| scheme.into().to_ascii_lowercase())
            .collect();
        self
    }

    pub(crate) fn compile(self) -> Result<CompiledConstraints, CompileError> {
        let host = self.host.as_deref().map(pattern::compile_host).transpose()?;
        Ok(CompiledConstraints {
            methods: self.methods,
            host,
            schemes: self.schemes,
        })
    }
}

/// The constraint set as stored on a registered route.
#[derive(Debug, Clone)]
pub(crate) struct CompiledConstraints {
    pub(crate) methods: Vec<String>,
    host: Option<RoutePattern>,
    schemes: Vec<String>,
}

impl CompiledConstraints {
    /// Scheme and host gate. Passing returns the host captures (empty when
    /// no host template is set); failing disqualifies the route outright.
    pub(crate) fn admit_target(
        &self,
        request: &RequestDescriptor,
    ) -> Option<Vec<(String, String)>> {
        if !self.schemes.is_empty()
            && !self
                .schemes
                .iter()
                .any(|scheme| scheme.eq_ignore_ascii_case(request.scheme()))
        {
            return None;
        }
        match &self.host {
            Some(pattern) => matcher::match_host(pattern, request.host()),
            None => Some(Vec::new()),
        }
    }

    /// Method gate, separate so the table can tell a 405 from a 404.
    pub(crate) fn admits_method(&self, method: &str) -> bool {
        self.methods.is_empty()
            || self
                .methods
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(method))
    }

    /// Variable names introduced by the host template.
    pub(crate) fn host_var_names(&self) -> impl Iterator<Item = &str> {
        self.host.iter().flat_map(RoutePattern::var_names)
    }
}
