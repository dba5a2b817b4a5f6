//! Template compilation.
//!
//! # Responsibilities
//! - Turn a template string into an ordered segment sequence
//! - Reject malformed templates at registration time, never at request time
//!
//! # Design Decisions
//! - Compilation is pure and deterministic; no shared state is touched
//! - Path templates are absolute (`/`-separated, leading slash required)
//! - Host templates reuse the same grammar over `.`-separated labels and
//!   fold literal case, since hosts compare case-insensitively

use std::collections::HashSet;

use thiserror::Error;

use super::segment::Segment;

/// Why a template failed to compile.
///
/// Every variant is a setup-time failure: registration surfaces it
/// immediately and the table is left unchanged.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The template was empty where a path is required.
    #[error("route template is empty")]
    EmptyTemplate,

    /// A path template that does not begin with `/`.
    #[error("route template {template:?} must begin with '/'")]
    RelativeTemplate { template: String },

    /// A `{` or `}` that does not wrap a whole segment.
    #[error("unbalanced braces in segment {segment:?}")]
    UnbalancedBraces { segment: String },

    /// A variable segment with no name, such as `{}` or `{:[0-9]+}`.
    #[error("variable segment {segment:?} is missing a name")]
    MissingVariableName { segment: String },

    /// The same variable name appeared twice in one route.
    #[error("duplicate variable {name:?} in template")]
    DuplicateVariable { name: String },

    /// A capture constraint that is not a valid regular expression.
    #[error("invalid capture constraint for variable {name:?}")]
    InvalidConstraint {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled route template: an ordered segment sequence, fixed at
/// registration time.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the variable segments, in template order.
    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::var_name)
    }
}

/// Compile a path template such as `/books/{title}/page/{page:[0-9]+}`.
///
/// The root template `/` compiles to an empty segment sequence and matches
/// only the root path.
pub fn compile_path(template: &str) -> Result<RoutePattern, CompileError> {
    if template.is_empty() {
        return Err(CompileError::EmptyTemplate);
    }
    let Some(rest) = template.strip_prefix('/') else {
        return Err(CompileError::RelativeTemplate {
            template: template.to_string(),
        });
    };
    compile_segments(rest, '/', false)
}

/// Compile a host template such as `{tenant}.example.com`.
///
/// Same grammar as paths over `.`-separated labels; literal labels are
/// folded to lowercase here so matching can stay a plain comparison.
pub fn compile_host(template: &str) -> Result<RoutePattern, CompileError> {
    if template.is_empty() {
        return Err(CompileError::EmptyTemplate);
    }
    compile_segments(template, '.', true)
}

fn compile_segments(
    rest: &str,
    separator: char,
    fold_case: bool,
) -> Result<RoutePattern, CompileError> {
    let mut segments = Vec::new();
    let mut names: HashSet<String> = HashSet::new();

    if !rest.is_empty() {
        for raw in rest.split(separator) {
            let mut segment = Segment::parse(raw)?;
            if fold_case {
                segment.fold_literal_case();
            }
            if let Some(name) = segment.var_name() {
                if !names.insert(name.to_string()) {
                    return Err(CompileError::DuplicateVariable {
                        name: name.to_string(),
                    });
                }
            }
            segments.push(segment);
        }
    }

    Ok(RoutePattern { segments })
}
