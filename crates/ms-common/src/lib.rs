//! Common primitives shared across the mindscript type core.
//!
//! This crate provides the two things every consumer of `ms-types` needs but
//! none of them owns:
//! - Source spans (`Span`) for pointing diagnostics at a location
//! - The two diagnostic kinds the type core raises (`diagnostics`)

pub mod diagnostics;
pub mod span;

pub use diagnostics::{Boundary, TypeMismatchError, TypeResolutionError};
pub use span::Span;
