//! Type-expression AST (C1).
//!
//! Nodes are immutable after parsing and freely shared: `TypeExpr` is a
//! cheap-to-clone handle around a reference-counted `TypeExprKind`. Sharing
//! subtrees is what makes C6's identity-keyed visited set meaningful — two
//! `TypeExpr` values that came from the same alias definition point at the
//! same allocation.

use std::fmt;
use std::rc::Rc;

/// A type expression. Cloning is an `Rc` bump, not a deep copy.
#[derive(Clone, Debug)]
pub struct TypeExpr(pub(crate) Rc<TypeExprKind>);

/// The primitive terminals. Any other identifier reaching `TypeExprKind::Terminal`
/// is an alias reference, resolved against an environment by the resolver (C4).
pub const PRIMITIVES: &[&str] = &[
    "Null", "Bool", "Int", "Num", "Str", "Array", "Object", "Type", "Any",
];

#[derive(Debug)]
pub enum TypeExprKind {
    /// A primitive name or an alias reference.
    Terminal(Rc<str>),
    /// Homogeneous array `[T]`.
    Array(TypeExpr),
    /// An object map with ordered entries and a required-key subset.
    Map {
        entries: Vec<(Rc<str>, TypeExpr)>,
        required: Vec<Rc<str>>,
    },
    /// Nullable wrapper `T?`.
    Unary(TypeExpr),
    /// Singleton-value set `T :: (v1, v2, ...)`.
    Enum {
        of: TypeExpr,
        values: Vec<crate::value::Value>,
    },
    /// Function arrow `left -> right`.
    Binary { left: TypeExpr, right: TypeExpr },
    /// Transparent grouping `(T)`.
    Grouping(TypeExpr),
    /// Transparent annotation, e.g. a doc comment attached to `T`.
    Annotation { inner: TypeExpr, note: Option<Rc<str>> },
}

impl TypeExpr {
    pub fn terminal(name: impl Into<Rc<str>>) -> Self {
        TypeExpr(Rc::new(TypeExprKind::Terminal(name.into())))
    }

    pub fn array(element: TypeExpr) -> Self {
        TypeExpr(Rc::new(TypeExprKind::Array(element)))
    }

    pub fn map(entries: Vec<(Rc<str>, TypeExpr)>, required: Vec<Rc<str>>) -> Self {
        TypeExpr(Rc::new(TypeExprKind::Map { entries, required }))
    }

    pub fn unary(inner: TypeExpr) -> Self {
        TypeExpr(Rc::new(TypeExprKind::Unary(inner)))
    }

    pub fn type_enum(of: TypeExpr, values: Vec<crate::value::Value>) -> Self {
        TypeExpr(Rc::new(TypeExprKind::Enum { of, values }))
    }

    pub fn binary(left: TypeExpr, right: TypeExpr) -> Self {
        TypeExpr(Rc::new(TypeExprKind::Binary { left, right }))
    }

    pub fn grouping(inner: TypeExpr) -> Self {
        TypeExpr(Rc::new(TypeExprKind::Grouping(inner)))
    }

    pub fn annotation(inner: TypeExpr, note: Option<Rc<str>>) -> Self {
        TypeExpr(Rc::new(TypeExprKind::Annotation { inner, note }))
    }

    pub fn kind(&self) -> &TypeExprKind {
        &self.0
    }

    /// Stable identity of this node, for the cycle-guard keys in C6.
    pub fn node_id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    /// True if `self` is `TypeTerminal(name)` for the given primitive or
    /// alias name (no resolution performed).
    pub fn is_terminal_named(&self, name: &str) -> bool {
        matches!(&*self.0, TypeExprKind::Terminal(n) if &**n == name)
    }

    pub fn terminal_name(&self) -> Option<&str> {
        match &*self.0 {
            TypeExprKind::Terminal(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.terminal_name()
            .is_some_and(|n| PRIMITIVES.contains(&n))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            TypeExprKind::Terminal(name) => write!(f, "{name}"),
            TypeExprKind::Array(e) => write!(f, "[{e}]"),
            TypeExprKind::Map { entries, required } => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    let opt = if required.iter().any(|r| &**r == &**k) {
                        ""
                    } else {
                        "?"
                    };
                    write!(f, "{k}{opt}: {v}")?;
                }
                write!(f, "}}")
            }
            TypeExprKind::Unary(inner) => write!(f, "{inner}?"),
            TypeExprKind::Enum { of, values } => {
                write!(f, "{of} :: (")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
            TypeExprKind::Binary { left, right } => write!(f, "function({left}) -> {right}"),
            TypeExprKind::Grouping(inner) => write!(f, "({inner})"),
            TypeExprKind::Annotation { inner, .. } => write!(f, "{inner}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_array_of_int() {
        let t = TypeExpr::array(TypeExpr::terminal("Int"));
        assert_eq!(t.to_string(), "[Int]");
    }

    #[test]
    fn display_nullable() {
        let t = TypeExpr::unary(TypeExpr::terminal("Str"));
        assert_eq!(t.to_string(), "Str?");
    }

    #[test]
    fn display_map_marks_optional_keys() {
        let t = TypeExpr::map(
            vec![
                ("a".into(), TypeExpr::terminal("Int")),
                ("b".into(), TypeExpr::terminal("Str")),
            ],
            vec!["a".into()],
        );
        assert_eq!(t.to_string(), "{a: Int, b?: Str}");
    }

    #[test]
    fn node_id_is_stable_for_clones() {
        let t = TypeExpr::terminal("Int");
        let clone = t.clone();
        assert_eq!(t.node_id(), clone.node_id());
    }

    #[test]
    fn distinct_nodes_have_distinct_ids() {
        let a = TypeExpr::terminal("Int");
        let b = TypeExpr::terminal("Int");
        assert_ne!(a.node_id(), b.node_id());
    }
}
