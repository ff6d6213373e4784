//! The two diagnostic kinds that cross the type core's boundary.
//!
//! Both are fatal to the current expression but not to the host process; the
//! REPL and script runner recover at statement granularity (spec.md §7). This
//! crate does not know about either of those hosts — it only defines the
//! error shapes they catch.

use crate::span::Span;
use std::fmt;

/// A named type reference did not resolve to a type value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeResolutionError {
    /// The identifier that failed to resolve, or that resolved to a
    /// non-type value.
    pub name: String,
    /// Where the reference occurred.
    pub site: Span,
}

impl TypeResolutionError {
    pub fn new(name: impl Into<String>, site: Span) -> Self {
        Self {
            name: name.into(),
            site,
        }
    }
}

impl fmt::Display for TypeResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot resolve type reference `{}` (at {}..{})",
            self.name, self.site.start, self.site.end
        )
    }
}

impl std::error::Error for TypeResolutionError {}

/// Which boundary a value failed `valueOf ⊑ T` at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// A callable's argument did not satisfy its declared input type.
    Input,
    /// A callable's result did not satisfy its declared output type.
    Output,
    /// An explicit in-language type assertion failed.
    Assertion,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Boundary::Input => "input",
            Boundary::Output => "output",
            Boundary::Assertion => "assertion",
        };
        f.write_str(s)
    }
}

/// A value failed `valueOf ⊑ T` at a call boundary or an explicit assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMismatchError {
    /// The expected type, already printed (the type core has no dependency
    /// on the language's real pretty printer).
    pub expected: String,
    /// The observed type, from `typeOf`, already printed.
    pub observed: String,
    /// Where the mismatched value was produced or passed.
    pub site: Span,
    /// Which boundary raised this error.
    pub boundary: Boundary,
}

impl TypeMismatchError {
    pub fn new(
        expected: impl Into<String>,
        observed: impl Into<String>,
        site: Span,
        boundary: Boundary,
    ) -> Self {
        Self {
            expected: expected.into(),
            observed: observed.into(),
            site,
            boundary,
        }
    }
}

impl fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} type mismatch: expected `{}`, found `{}` (at {}..{})",
            self.boundary, self.expected, self.observed, self.site.start, self.site.end
        )
    }
}

impl std::error::Error for TypeMismatchError {}
