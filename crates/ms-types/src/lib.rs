//! The structural type core of mindscript.
//!
//! This module is organized into several submodules:
//! - `type_expr` — the type-expression AST (C1)
//! - `value` — the runtime value model, including typed callables (C2)
//! - `environment` — lexically chained name→value bindings (C3)
//! - `resolver` — alias/annotation resolution against an environment (C4)
//! - `value_typing` — `valueOf(v) ⊑ T` (C5)
//! - `subtype` — `T1 ⊑ T2`, cycle-guarded structural subtyping (C6)
//! - `type_of` — inference of the most specific type for a value (C7)
//! - `call_boundary` — call-boundary and assertion enforcement (§4.7)
//!
//! The core does not construct type-AST nodes or values except to synthesize
//! the canonical terminals `typeOf` returns; it consumes whatever the parser
//! and evaluator hand it. It is single-threaded and synchronous: every
//! relation here is a pure function of its inputs.

pub mod call_boundary;
pub mod environment;
pub mod resolver;
pub mod subtype;
pub mod type_expr;
pub mod type_of;
pub mod value;
pub mod value_typing;

pub use call_boundary::{assert_type, enforce_call};
pub use environment::{EnvHandle, Environment};
pub use ms_common::{Boundary, Span, TypeMismatchError, TypeResolutionError};
pub use resolver::resolve;
pub use subtype::{is_subtype, is_subtype_value};
pub use type_expr::TypeExpr;
pub use type_of::type_of;
pub use value::{FunctionDef, Value};
pub use value_typing::check_type;
