//! Call-boundary enforcement (spec.md §4.7) and the supplementary
//! assertion operation recovered from `original_source/ms/native.py`.
//!
//! Both checks in `enforce_call` run against the callable's own
//! definition-site environment, not the caller's — a `TypeBinary` embedded
//! in a closure may reference names only visible where the closure was
//! created.

use crate::environment::EnvHandle;
use crate::type_expr::{TypeExpr, TypeExprKind};
use crate::type_of::type_of;
use crate::value::Value;
use crate::value_typing::check_type;
use ms_common::{Boundary, Span, TypeMismatchError};

fn arrow_parts(def_types: &TypeExpr) -> (TypeExpr, TypeExpr) {
    match def_types.kind() {
        TypeExprKind::Binary { left, right } => (left.clone(), right.clone()),
        // A callable whose declared type isn't an arrow admits anything on
        // both sides rather than panicking; malformed definitions are the
        // evaluator's problem to have caught earlier.
        _ => (TypeExpr::terminal("Any"), TypeExpr::terminal("Any")),
    }
}

/// Checks `arg` against `callable`'s declared input type, invokes `eval` to
/// produce the result, then checks the result against the declared output
/// type. Both checks run against `callable`'s own captured environment.
pub fn enforce_call(
    callable: &Value,
    arg: Value,
    eval: impl FnOnce(Value) -> Value,
) -> Result<Value, TypeMismatchError> {
    let Value::CallableValue { def, env } = callable else {
        // Not the type core's concern: the evaluator never calls a
        // non-callable. Treat it as vacuously passing through.
        return Ok(eval(arg));
    };

    let (input_ty, output_ty) = arrow_parts(&def.types);

    let arg_ok = check_type(&arg, &input_ty, env).unwrap_or(false);
    if !arg_ok {
        tracing::trace!(boundary = "input", "call boundary rejected argument");
        return Err(TypeMismatchError::new(
            input_ty.to_string(),
            type_of(&arg).to_string(),
            Span::UNKNOWN,
            Boundary::Input,
        ));
    }

    let result = eval(arg);

    let result_ok = check_type(&result, &output_ty, env).unwrap_or(false);
    if !result_ok {
        tracing::trace!(boundary = "output", "call boundary rejected result");
        return Err(TypeMismatchError::new(
            output_ty.to_string(),
            type_of(&result).to_string(),
            Span::UNKNOWN,
            Boundary::Output,
        ));
    }

    tracing::trace!("call boundary passed");
    Ok(result)
}

/// An explicit in-language type assertion, distinct from a call boundary
/// (`checktype`-style, recovered from the source's native assertion). Fails
/// with `Boundary::Assertion` rather than `Input`/`Output`.
pub fn assert_type(
    v: &Value,
    t: &TypeExpr,
    env: &EnvHandle,
) -> Result<(), TypeMismatchError> {
    let ok = check_type(v, t, env).unwrap_or(false);
    if ok {
        Ok(())
    } else {
        tracing::trace!("type assertion failed");
        Err(TypeMismatchError::new(
            t.to_string(),
            type_of(v).to_string(),
            Span::UNKNOWN,
            Boundary::Assertion,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::value::FunctionDef;
    use std::rc::Rc;

    fn num_to_num() -> Value {
        let env = Environment::root();
        let def = Rc::new(FunctionDef {
            name: Some("double".into()),
            params: vec!["x".into()],
            types: TypeExpr::binary(TypeExpr::terminal("Num"), TypeExpr::terminal("Num")),
        });
        Value::CallableValue { def, env }
    }

    #[test]
    fn valid_call_passes_through_result() {
        let callable = num_to_num();
        let result = enforce_call(&callable, Value::Num(2.0), |v| match v {
            Value::Num(n) => Value::Num(n * 2.0),
            other => other,
        })
        .unwrap();
        assert_eq!(result, Value::Num(4.0));
    }

    #[test]
    fn int_argument_rejected_by_num_input_type() {
        // scenario 8 from spec.md §8: calling function(x: Num) -> Num with 3.
        let callable = num_to_num();
        let err = enforce_call(&callable, Value::Int(3), |v| v).unwrap_err();
        assert_eq!(err.boundary, Boundary::Input);
    }

    #[test]
    fn output_type_mismatch_is_reported_as_output_boundary() {
        let callable = num_to_num();
        let err = enforce_call(&callable, Value::Num(1.0), |_| Value::Str("oops".into()))
            .unwrap_err();
        assert_eq!(err.boundary, Boundary::Output);
    }

    #[test]
    fn assert_type_passes_for_matching_value() {
        let env = Environment::root();
        assert!(assert_type(&Value::Int(1), &TypeExpr::terminal("Int"), &env).is_ok());
    }

    #[test]
    fn assert_type_fails_with_assertion_boundary() {
        let env = Environment::root();
        let err = assert_type(&Value::Int(1), &TypeExpr::terminal("Str"), &env).unwrap_err();
        assert_eq!(err.boundary, Boundary::Assertion);
    }
}
