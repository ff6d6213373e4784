//! Value-typing (C5): `valueOf(v) ⊑ T`.
//!
//! The target is resolved via C4 before every dispatch (spec.md §4.4), which
//! is why this is one recursive function rather than a single top-level
//! resolve followed by a flat match: a nested field type (an array element,
//! an object value, a nullable's inner type) can itself be an alias that
//! needs its own resolution pass, and a nested *value* (a function or a
//! first-class type stored inside a list) needs the full rule table again,
//! not just the primitive-shape table.

use crate::environment::EnvHandle;
use crate::resolver::resolve;
use crate::subtype::is_subtype;
use crate::type_expr::{TypeExpr, TypeExprKind};
use crate::value::Value;
use ms_common::{Span, TypeResolutionError};

/// `valueOf(v) ⊑ T`.
pub fn check_type(v: &Value, t: &TypeExpr, env: &EnvHandle) -> Result<bool, TypeResolutionError> {
    let (t, renv) = resolve(t, env, Span::UNKNOWN)?;

    // Rule 1: Any admits everything.
    if t.is_terminal_named("Any") {
        return Ok(true);
    }

    match v {
        // Rule 2: a first-class type satisfies only `Type`.
        Value::TypeValue { .. } => Ok(t.is_terminal_named("Type")),

        // Rule 3: a callable satisfies T iff its declared arrow is a
        // subtype of T, checked against the callable's own definition-site
        // environment.
        Value::CallableValue {
            def,
            env: callable_env,
        } => is_subtype(&def.types, callable_env, &t, &renv),

        // Rule 4: primitive table match.
        Value::Null
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Num(_)
        | Value::Str(_)
        | Value::Array(_)
        | Value::Object(_) => check_primitive(v, &t, &renv),
    }
}

fn check_primitive(
    v: &Value,
    t: &TypeExpr,
    env: &EnvHandle,
) -> Result<bool, TypeResolutionError> {
    match (v, t.kind()) {
        (Value::Null, TypeExprKind::Terminal(n)) if &**n == "Null" => Ok(true),
        (Value::Bool(_), TypeExprKind::Terminal(n)) if &**n == "Bool" => Ok(true),
        (Value::Int(_), TypeExprKind::Terminal(n)) if &**n == "Int" => Ok(true),
        (Value::Num(_), TypeExprKind::Terminal(n)) if &**n == "Num" => Ok(true),
        (Value::Str(_), TypeExprKind::Terminal(n)) if &**n == "Str" => Ok(true),
        (Value::Array(_), TypeExprKind::Terminal(n)) if &**n == "Array" => Ok(true),
        (Value::Object(_), TypeExprKind::Terminal(n)) if &**n == "Object" => Ok(true),

        (Value::Array(items), TypeExprKind::Array(elem)) => {
            for item in items {
                if !check_type(item, elem, env)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }

        (Value::Object(fields), TypeExprKind::Map { entries, required }) => {
            for (key, value) in fields {
                let Some((_, field_ty)) = entries.iter().find(|(k, _)| k == key) else {
                    // Strict-closed: an extra key beyond the declared entries fails.
                    return Ok(false);
                };
                if !check_type(value, field_ty, env)? {
                    return Ok(false);
                }
            }
            for req in required {
                if !fields.iter().any(|(k, _)| k == req) {
                    return Ok(false);
                }
            }
            Ok(true)
        }

        (_, TypeExprKind::Enum { values, .. }) => Ok(values.contains(v)),

        (Value::Null, TypeExprKind::Unary(_)) => Ok(true),
        (_, TypeExprKind::Unary(inner)) => check_type(v, inner, env),

        _ => Ok(false),
    }
}
