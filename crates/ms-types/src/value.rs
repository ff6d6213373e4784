//! Runtime value model (C2).
//!
//! `Value` is what the evaluator hands the type core at a call boundary or
//! an assertion. The core never constructs these beyond composing them out
//! of pieces already built elsewhere — it only inspects them.
//!
//! Unlike a split "primitive vs. callable vs. type" tier, containers here
//! are homogeneous in shape but heterogeneous in content — `Array` and
//! `Object` hold full `Value`s, not a restricted primitive-only payload,
//! because the source language is dynamically typed: a list can hold a
//! mix of numbers, functions, and first-class types. `valueOf`/`typeOf`
//! therefore recurse through the *whole* `Value` tree, not just its
//! primitive skeleton.

use crate::environment::EnvHandle;
use crate::type_expr::TypeExpr;
use std::fmt;
use std::rc::Rc;

/// A user or native function's declared signature. The core treats both the
/// same way; the distinction between a tree-walked body and a native
/// trampoline belongs to the evaluator.
#[derive(Clone, Debug)]
pub struct FunctionDef {
    pub name: Option<Rc<str>>,
    /// Parameter names, carried for diagnostics only.
    pub params: Vec<Rc<str>>,
    /// Must resolve to `TypeExprKind::Binary` under C4.
    pub types: TypeExpr,
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Num(f64),
    Str(Rc<str>),
    Array(Vec<Value>),
    /// Ordered key→value map, matching `TypeMap`'s ordered entries.
    Object(Vec<(Rc<str>, Value)>),
    /// A first-class type, carrying the environment active at its
    /// definition site so embedded named references resolve correctly.
    TypeValue { def: TypeExpr, env: EnvHandle },
    /// A user or native function, likewise carrying its definition-site
    /// environment.
    CallableValue { def: Rc<FunctionDef>, env: EnvHandle },
}

impl PartialEq for Value {
    /// Deep structural equality over the primitive shapes, used by
    /// `TypeEnum` literal matching (C5 rule 9). `Int` and `Num` are never
    /// equal to one another, mirroring the rest of the type system's
    /// refusal to conflate them. `TypeValue` and `CallableValue` are never
    /// equal to anything, including themselves — the source language has
    /// no notion of function or type identity comparison, and enum
    /// literals are never functions or types in practice.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Num(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::TypeValue { def, .. } => write!(f, "<type {def}>"),
            Value::CallableValue { def, .. } => match &def.name {
                Some(name) => write!(f, "<function {name}>"),
                None => write!(f, "<function>"),
            },
        }
    }
}
