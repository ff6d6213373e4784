//! Type-of (C7): `typeOf(v) -> TypeExpr`.
//!
//! The bounded join over list elements (spec.md §4.6) is intentionally not a
//! true lattice join — it is order-sensitive and biased toward the
//! first-seen element type, matching `original_source/ms/types.py`'s
//! `typeof` loop. This is documented as intended in spec.md §9 item 4, not a
//! bug to fix.

use crate::environment::{EnvHandle, Environment};
use crate::subtype::is_subtype;
use crate::type_expr::TypeExpr;
use crate::value::Value;

/// Produces the most specific type expression admitting `v`. Never fails:
/// inference has no named references to resolve and therefore no way for
/// `TypeResolutionError` to arise.
pub fn type_of(v: &Value) -> TypeExpr {
    match v {
        Value::Null => TypeExpr::terminal("Null"),
        Value::Bool(_) => TypeExpr::terminal("Bool"),
        Value::Int(_) => TypeExpr::terminal("Int"),
        Value::Num(_) => TypeExpr::terminal("Num"),
        Value::Str(_) => TypeExpr::terminal("Str"),
        Value::TypeValue { .. } => TypeExpr::terminal("Type"),
        Value::CallableValue { def, .. } => def.types.clone(),
        Value::Array(items) => {
            if items.is_empty() {
                return TypeExpr::terminal("Array");
            }
            TypeExpr::array(join_element_types(items))
        }
        Value::Object(fields) => {
            let entries = fields
                .iter()
                .map(|(k, v)| (k.clone(), type_of(v)))
                .collect();
            TypeExpr::map(entries, vec![])
        }
    }
}

fn join_element_types(items: &[Value]) -> TypeExpr {
    // A fresh, definition-free environment: element types synthesized here
    // are always primitive/container constructors, never alias references,
    // so subtype comparisons below never need to resolve a name.
    let env: EnvHandle = Environment::root();

    let mut gtype: Option<TypeExpr> = None;
    let mut nullable = false;
    let mut anytype = false;

    for item in items {
        let s = type_of(item);
        if s.is_terminal_named("Null") {
            nullable = true;
            continue;
        }
        match &gtype {
            None => gtype = Some(s),
            Some(g) => {
                if is_subtype(&s, &env, g, &env).unwrap_or(false) {
                    // keep gtype
                } else if is_subtype(g, &env, &s, &env).unwrap_or(false) {
                    gtype = Some(s);
                } else {
                    anytype = true;
                    break;
                }
            }
        }
    }

    if anytype {
        return TypeExpr::terminal("Any");
    }
    let gtype = gtype.unwrap_or_else(|| TypeExpr::terminal("Any"));
    if nullable {
        TypeExpr::unary(gtype)
    } else {
        gtype
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ints_join_to_int() {
        let v = Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(type_of(&v).to_string(), "[Int]");
    }

    #[test]
    fn null_elements_make_result_nullable() {
        let v = Value::Array(vec![Value::Int(1), Value::Null, Value::Int(2)]);
        assert_eq!(type_of(&v).to_string(), "[Int?]");
    }

    #[test]
    fn incomparable_elements_join_to_any() {
        let v = Value::Array(vec![Value::Int(1), Value::Str("x".into())]);
        assert_eq!(type_of(&v).to_string(), "[Any]");
    }

    #[test]
    fn empty_array_is_bare_array_terminal() {
        let v = Value::Array(vec![]);
        assert_eq!(type_of(&v).to_string(), "Array");
    }

    #[test]
    fn object_fields_typed_individually_with_no_required_keys() {
        let v = Value::Object(vec![
            ("name".into(), Value::Str("x".into())),
            ("age".into(), Value::Int(3)),
        ]);
        assert_eq!(type_of(&v).to_string(), "{name?: Str, age?: Int}");
    }

    #[test]
    fn callable_typeof_is_its_declared_arrow() {
        use crate::value::FunctionDef;
        use std::rc::Rc;

        let env = Environment::root();
        let def = Rc::new(FunctionDef {
            name: None,
            params: vec!["x".into()],
            types: TypeExpr::binary(TypeExpr::terminal("Int"), TypeExpr::terminal("Int")),
        });
        let callable = Value::CallableValue { def, env };
        assert_eq!(type_of(&callable).to_string(), "function(Int) -> Int");
    }

    #[test]
    fn type_value_typeof_is_bare_type_terminal() {
        let env = Environment::root();
        let t = Value::TypeValue {
            def: TypeExpr::terminal("Int"),
            env,
        };
        assert_eq!(type_of(&t).to_string(), "Type");
    }
}
