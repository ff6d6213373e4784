//! Resolver (C4): `resolve(t, env) -> (t', env')`.
//!
//! Strips transparent wrappers and dereferences named aliases until a
//! constructor (terminal, array, map, unary, enum, binary) remains. Ported
//! from `original_source/ms/types.py::_resolve_type`, which loops with a
//! `while resolving` flag rather than recursion — kept here as an explicit
//! loop for the same reason the source uses one: resolution depth is driven
//! by alias-chain length, not AST depth, and a loop makes that visible.
//!
//! Cycle safety for *structural* recursion (an alias that refers to itself
//! through a nested field) is C6's job, not this function's — spec.md §4.3
//! is explicit that this loop alone only terminates "under the assumption
//! that alias chains are acyclic." The one case this function does guard
//! against directly is a degenerate *direct* self-alias (`type A = A`),
//! which would otherwise spin forever before C6 ever gets a second node to
//! compare against; `resolve` tracks the (node, env) pairs it has already
//! dereferenced and fails with `TypeResolutionError` on a repeat.

use crate::environment::EnvHandle;
use crate::type_expr::{TypeExpr, TypeExprKind};
use crate::value::Value;
use ms_common::{Span, TypeResolutionError};
use rustc_hash::FxHashSet;

/// Resolves `t` against `env`, stripping annotations/grouping and
/// dereferencing named aliases. `site` is only used to attribute a
/// `TypeResolutionError` to a source location.
pub fn resolve(
    t: &TypeExpr,
    env: &EnvHandle,
    site: Span,
) -> Result<(TypeExpr, EnvHandle), TypeResolutionError> {
    let mut t = t.clone();
    let mut env = env.clone();
    let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();

    loop {
        match t.kind() {
            TypeExprKind::Annotation { inner, .. } => {
                t = inner.clone();
            }
            TypeExprKind::Grouping(inner) => {
                t = inner.clone();
            }
            TypeExprKind::Terminal(name) if !t.is_primitive() => {
                let key = (t.node_id(), std::rc::Rc::as_ptr(&env) as usize);
                if !seen.insert(key) {
                    return Err(TypeResolutionError::new(name.to_string(), site));
                }
                let bound = env
                    .borrow()
                    .get(name)
                    .ok_or_else(|| TypeResolutionError::new(name.to_string(), site))?;
                match bound {
                    Value::TypeValue { def, env: def_env } => {
                        tracing::trace!(alias = %name, "resolved alias reference");
                        t = def;
                        env = def_env;
                    }
                    _ => return Err(TypeResolutionError::new(name.to_string(), site)),
                }
            }
            _ => return Ok((t, env)),
        }
    }
}
