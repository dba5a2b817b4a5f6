//! Template segments.
//!
//! # Responsibilities
//! - Parse one separator-delimited template segment
//! - Hold the compiled capture constraint for variable segments
//! - Answer whether a raw piece of path satisfies a segment

use regex::Regex;

use super::compiler::CompileError;

/// One component of a compiled route template.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Matches the corresponding path segment verbatim, case-sensitively.
    Literal(String),
    /// Matches per the capture constraint and records the value.
    Variable(VarSpec),
}

/// A named variable segment with an optional capture constraint.
#[derive(Debug, Clone)]
pub struct VarSpec {
    name: String,
    constraint: Option<Regex>,
}

impl VarSpec {
    /// The variable name used as the capture key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if the raw text is an acceptable capture.
    ///
    /// Without an explicit constraint any non-empty run is accepted; the
    /// split has already guaranteed the text contains no separator.
    pub(crate) fn accepts(&self, raw: &str) -> bool {
        match &self.constraint {
            Some(re) => re.is_match(raw),
            None => !raw.is_empty(),
        }
    }
}

impl Segment {
    /// Parse one raw template segment.
    ///
    /// `{name}` and `{name:regex}` are variables; everything else is a
    /// literal. Braces are only meaningful when they wrap the whole segment,
    /// so a stray brace anywhere is rejected rather than matched literally.
    pub(crate) fn parse(raw: &str) -> Result<Self, CompileError> {
        let opens = raw.starts_with('{');
        let closes = raw.ends_with('}') && raw.len() > 1;

        if !opens && !closes {
            if raw.contains('{') || raw.contains('}') {
                return Err(CompileError::UnbalancedBraces {
                    segment: raw.to_string(),
                });
            }
            return Ok(Self::Literal(raw.to_string()));
        }
        if !(opens && closes) {
            return Err(CompileError::UnbalancedBraces {
                segment: raw.to_string(),
            });
        }

        let body = &raw[1..raw.len() - 1];
        let (name, constraint) = match body.split_once(':') {
            Some((name, re)) => (name, Some(re)),
            None => (body, None),
        };
        if name.is_empty() {
            return Err(CompileError::MissingVariableName {
                segment: raw.to_string(),
            });
        }
        if name.contains('{') || name.contains('}') {
            return Err(CompileError::UnbalancedBraces {
                segment: raw.to_string(),
            });
        }

        let constraint = match constraint {
            Some(re) => Some(Regex::new(&format!("^(?:{re})$")).map_err(|source| {
                CompileError::InvalidConstraint {
                    name: name.to_string(),
                    source,
                }
            })?),
            None => None,
        };

        Ok(Self::Variable(VarSpec {
            name: name.to_string(),
            constraint,
        }))
    }

    /// The capture key, when this segment is a variable.
    pub fn var_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Variable(var) => Some(var.name()),
        }
    }

    /// Lowercase the literal text; host templates match case-insensitively.
    pub(crate) fn fold_literal_case(&mut self) {
        if let Self::Literal(text) = self {
            *text = text.to_ascii_lowercase();
        }
    }
}
