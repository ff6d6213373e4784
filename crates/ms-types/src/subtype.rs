//! Subtyping (C6): `T1 ⊑ T2`.
//!
//! Resolves both operands through C4, then dispatches the ten rules of
//! spec.md §4.5 (including the three source-fidelity decisions recorded in
//! DESIGN.md: required-set *equality* for maps, covariance in both arrow
//! positions, and an explicit `true` on the empty-intersection map case).
//!
//! Cycle safety is owned entirely by this module: the visited set is an
//! unordered pair of resolved-node identities, grounded in
//! `tsz-checker/src/assignability_checker.rs`'s `rustc_hash::FxHashSet`
//! cycle guard for self-referencing types. A revisited pair is admitted
//! optimistically (`true`) — this is the co-inductive step that lets
//! recursive aliases like `List = {head: Int, tail: List?}` compare equal to
//! themselves in finite time.

use crate::environment::EnvHandle;
use crate::resolver::resolve;
use crate::type_expr::{TypeExpr, TypeExprKind};
use crate::value::Value;
use ms_common::{Span, TypeResolutionError};
use rustc_hash::FxHashSet;

/// `isSubtype(TypeValue a, TypeValue b) -> bool` — false if either argument
/// is not a type value (spec.md §6). Resolution failures inside the
/// relation itself still propagate, per spec.md §7: "internal failures of
/// C4 during C6 are reported to the user at the call site that triggered
/// the subtype query."
pub fn is_subtype_value(a: &Value, b: &Value) -> Result<bool, TypeResolutionError> {
    let (Value::TypeValue { def: t1, env: env1 }, Value::TypeValue { def: t2, env: env2 }) =
        (a, b)
    else {
        return Ok(false);
    };
    is_subtype(t1, env1, t2, env2)
}

/// `T1 ⊑ T2` over bare type expressions plus their definition-site
/// environments. This is what C5 and C7 call internally.
pub fn is_subtype(
    t1: &TypeExpr,
    env1: &EnvHandle,
    t2: &TypeExpr,
    env2: &EnvHandle,
) -> Result<bool, TypeResolutionError> {
    let mut visited: FxHashSet<(usize, usize)> = FxHashSet::default();
    is_subtype_rec(t1, env1, t2, env2, &mut visited)
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

fn is_subtype_rec(
    t1: &TypeExpr,
    env1: &EnvHandle,
    t2: &TypeExpr,
    env2: &EnvHandle,
    visited: &mut FxHashSet<(usize, usize)>,
) -> Result<bool, TypeResolutionError> {
    let (t1, env1) = resolve(t1, env1, Span::UNKNOWN)?;
    let (t2, env2) = resolve(t2, env2, Span::UNKNOWN)?;

    let key = pair_key(t1.node_id(), t2.node_id());
    if !visited.insert(key) {
        tracing::debug!("subtype cycle guard hit, admitting optimistically");
        return Ok(true);
    }

    // Reflexivity (spec.md §8): the same resolved node is always a subtype
    // of itself. This also covers the one combination the ten dispatch
    // rules leave unstated — two (structurally or referentially) identical
    // enum types — without which `T ⊑ T` would fail for enums.
    if t1.node_id() == t2.node_id() {
        return Ok(true);
    }

    // Rule 1: Any is top.
    if t2.is_terminal_named("Any") {
        return Ok(true);
    }

    // Rule 7: enum delegates through its base type (checked before the
    // terminal/array/map/unary rules below so `t1` is never matched as an
    // enum by accident in those branches).
    if let TypeExprKind::Enum { of, .. } = t1.kind() {
        if !matches!(t2.kind(), TypeExprKind::Enum { .. }) {
            tracing::debug!("subtype: enum delegates to base type");
            return is_subtype_rec(of, &env1, &t2, &env2, visited);
        }
    }

    match (t1.kind(), t2.kind()) {
        // Rule 2: identical terminals.
        (TypeExprKind::Terminal(a), TypeExprKind::Terminal(b)) => Ok(a == b),

        // Rule 3: array widens to the bare Array terminal.
        (TypeExprKind::Array(_), TypeExprKind::Terminal(name)) if &**name == "Array" => Ok(true),

        // Rule 4: arrays are covariant in their element.
        (TypeExprKind::Array(e1), TypeExprKind::Array(e2)) => {
            is_subtype_rec(e1, &env1, e2, &env2, visited)
        }

        // Rule 5: map widens to the bare Object terminal.
        (TypeExprKind::Map { .. }, TypeExprKind::Terminal(name)) if &**name == "Object" => {
            Ok(true)
        }

        // Rule 6: width + required-set equality + depth.
        (
            TypeExprKind::Map {
                entries: e1,
                required: r1,
            },
            TypeExprKind::Map {
                entries: e2,
                required: r2,
            },
        ) => {
            let keys2: FxHashSet<&str> = e2.iter().map(|(k, _)| &**k).collect();
            let width_ok = e1.iter().all(|(k, _)| keys2.contains(&**k));
            if !width_ok {
                return Ok(false);
            }
            let req1: FxHashSet<&str> = r1.iter().map(|k| &**k).collect();
            let req2: FxHashSet<&str> = r2.iter().map(|k| &**k).collect();
            if req1 != req2 {
                return Ok(false);
            }
            for (k, v1) in e1.iter() {
                if let Some((_, v2)) = e2.iter().find(|(k2, _)| k2 == k) {
                    if !is_subtype_rec(v1, &env1, v2, &env2, visited)? {
                        return Ok(false);
                    }
                }
            }
            // Open question 3: fixed fallthrough — width and required-set
            // checks already passed, so this is `true` even when no keys
            // are shared between the two maps.
            Ok(true)
        }

        // Rule 8: nullable widening on the right.
        (_, TypeExprKind::Unary(u2)) => match t1.kind() {
            TypeExprKind::Unary(u1) => is_subtype_rec(u1, &env1, u2, &env2, visited),
            TypeExprKind::Terminal(name) if &**name == "Null" => Ok(true),
            _ => is_subtype_rec(&t1, &env1, u2, &env2, visited),
        },

        // Rule 9: arrows, covariant in both positions (source-fidelity
        // decision — see DESIGN.md).
        (
            TypeExprKind::Binary {
                left: l1,
                right: r1,
            },
            TypeExprKind::Binary {
                left: l2,
                right: r2,
            },
        ) => {
            Ok(is_subtype_rec(l1, &env1, l2, &env2, visited)?
                && is_subtype_rec(r1, &env1, r2, &env2, visited)?)
        }

        // Rule 10.
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;

    fn root() -> EnvHandle {
        Environment::root()
    }

    fn sub(t1: &TypeExpr, t2: &TypeExpr) -> bool {
        let env = root();
        is_subtype(t1, &env, t2, &env).unwrap()
    }

    #[test]
    fn reflexive_for_terminals() {
        let t = TypeExpr::terminal("Int");
        assert!(sub(&t, &t));
    }

    #[test]
    fn everything_is_subtype_of_any() {
        let t = TypeExpr::array(TypeExpr::terminal("Str"));
        assert!(sub(&t, &TypeExpr::terminal("Any")));
    }

    #[test]
    fn array_widens_to_bare_array() {
        let t = TypeExpr::array(TypeExpr::terminal("Int"));
        assert!(sub(&t, &TypeExpr::terminal("Array")));
    }

    #[test]
    fn map_widens_to_bare_object() {
        let t = TypeExpr::map(vec![("a".into(), TypeExpr::terminal("Int"))], vec!["a".into()]);
        assert!(sub(&t, &TypeExpr::terminal("Object")));
    }

    #[test]
    fn nullable_widening_both_directions() {
        let int_ty = TypeExpr::terminal("Int");
        let nullable_int = TypeExpr::unary(int_ty.clone());
        assert!(sub(&int_ty, &nullable_int));
        assert!(sub(&TypeExpr::terminal("Null"), &nullable_int));
    }

    #[test]
    fn int_is_not_subtype_of_num() {
        assert!(!sub(&TypeExpr::terminal("Int"), &TypeExpr::terminal("Num")));
    }

    #[test]
    fn required_superset_fails_required_equality() {
        // scenario 5 from spec.md §8: {a: Int, b?: Str} is not <: {a: Int}
        let wide = TypeExpr::map(
            vec![
                ("a".into(), TypeExpr::terminal("Int")),
                ("b".into(), TypeExpr::terminal("Str")),
            ],
            vec!["a".into()],
        );
        let narrow = TypeExpr::map(vec![("a".into(), TypeExpr::terminal("Int"))], vec!["a".into()]);
        assert!(!sub(&wide, &narrow));
    }

    #[test]
    fn narrower_map_widens_when_required_sets_already_match() {
        // Width (keys(narrow) ⊆ keys(wide)) holds, and both sides declare the
        // same required set {a}, so rule 6 admits this direction. spec.md §8
        // scenario 5 claims this direction is also false "because required-set
        // equality fails," but the two required sets here are both {a} and are
        // equal — the scenario text is inconsistent with its own rule 6; the
        // rule-faithful result is kept rather than the scenario's claim.
        let narrow = TypeExpr::map(vec![("a".into(), TypeExpr::terminal("Int"))], vec!["a".into()]);
        let wide = TypeExpr::map(
            vec![
                ("a".into(), TypeExpr::terminal("Int")),
                ("b".into(), TypeExpr::terminal("Str")),
            ],
            vec!["a".into()],
        );
        assert!(sub(&narrow, &wide));
    }

    #[test]
    fn empty_key_intersection_map_still_subtypes_when_width_and_required_hold() {
        let t1 = TypeExpr::map(vec![], vec![]);
        let t2 = TypeExpr::map(vec![], vec![]);
        assert!(sub(&t1, &t2));
    }

    #[test]
    fn arrows_are_covariant_in_both_positions() {
        let narrower = TypeExpr::binary(TypeExpr::terminal("Int"), TypeExpr::terminal("Int"));
        let wider = TypeExpr::binary(TypeExpr::terminal("Any"), TypeExpr::terminal("Any"));
        assert!(sub(&narrower, &wider));
        assert!(!sub(&wider, &narrower));
    }

    #[test]
    fn enum_is_reflexive() {
        let e = TypeExpr::type_enum(TypeExpr::terminal("Int"), vec![Value::Int(1)]);
        assert!(sub(&e, &e));
    }

    #[test]
    fn enum_delegates_to_base_type() {
        let e = TypeExpr::type_enum(TypeExpr::terminal("Int"), vec![Value::Int(1), Value::Int(2)]);
        assert!(sub(&e, &TypeExpr::terminal("Int")));
        assert!(sub(&e, &TypeExpr::terminal("Any")));
    }

    #[test]
    fn self_referential_alias_is_subtype_of_itself() {
        let env = root();
        let list_type = TypeExpr::map(
            vec![
                ("head".into(), TypeExpr::terminal("Int")),
                ("tail".into(), TypeExpr::unary(TypeExpr::terminal("List"))),
            ],
            vec!["head".into(), "tail".into()],
        );
        env.borrow_mut().define(
            "List",
            Value::TypeValue {
                def: list_type,
                env: env.clone(),
            },
        );
        let list_ref = TypeExpr::terminal("List");
        // Must terminate in finite time via the co-inductive visited set.
        assert!(is_subtype(&list_ref, &env, &list_ref, &env).unwrap());
    }

    #[test]
    fn is_subtype_value_false_for_non_type_values() {
        let a = Value::Int(1);
        let b = Value::TypeValue {
            def: TypeExpr::terminal("Int"),
            env: root(),
        };
        assert!(!is_subtype_value(&a, &b).unwrap());
    }
}
