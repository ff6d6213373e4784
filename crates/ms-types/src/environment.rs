//! Environment (C3): a lexically chained name→value mapping.
//!
//! Every `TypeValue` and every `CallableValue` retains a handle to the
//! environment active at its creation (spec.md's invariant). The type core
//! only ever reads through that handle — `resolve` never mutates an
//! environment — but the evaluator that builds environments needs to define
//! names and push child scopes, so those operations live here too.
//!
//! Grounded in the source's `Environment(enclosing=...)` chain
//! (`original_source/ms/native.py`) and generalized to the reference-counted
//! frame shape spec.md §5 calls for: each frame owns a back-reference to its
//! enclosing frame, and cycles among user types go through the name→value
//! binding rather than through direct frame ownership, so plain `Rc` sharing
//! is sufficient (no cycle collector needed).

use crate::value::Value;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// A shared handle to an `Environment` frame.
pub type EnvHandle = Rc<RefCell<Environment>>;

/// One lexical scope: its own bindings plus a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<Rc<str>, Value>,
    enclosing: Option<EnvHandle>,
}

impl Environment {
    /// A fresh root environment with no enclosing scope.
    pub fn root() -> EnvHandle {
        Rc::new(RefCell::new(Environment {
            bindings: FxHashMap::default(),
            enclosing: None,
        }))
    }

    /// A new child scope chained to `parent`.
    pub fn child(parent: &EnvHandle) -> EnvHandle {
        Rc::new(RefCell::new(Environment {
            bindings: FxHashMap::default(),
            enclosing: Some(Rc::clone(parent)),
        }))
    }

    /// Binds `name` in this frame, shadowing any binding of the same name in
    /// an enclosing frame.
    pub fn define(&mut self, name: impl Into<Rc<str>>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Looks up `name`, walking the chain toward the root. This is the only
    /// capability the type core itself requires (spec.md §4.2).
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.bindings.get(name) {
            return Some(v.clone());
        }
        self.enclosing.as_ref()?.borrow().get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_to_enclosing_scope() {
        let root = Environment::root();
        root.borrow_mut().define("x", Value::Int(1));
        let child = Environment::child(&root);
        child.borrow_mut().define("y", Value::Int(2));

        assert!(matches!(child.borrow().get("x"), Some(Value::Int(1))));
        assert!(matches!(child.borrow().get("y"), Some(Value::Int(2))));
        assert!(root.borrow().get("y").is_none());
    }

    #[test]
    fn shadowing_prefers_innermost_binding() {
        let root = Environment::root();
        root.borrow_mut().define("x", Value::Int(1));
        let child = Environment::child(&root);
        child.borrow_mut().define("x", Value::Int(2));

        assert!(matches!(child.borrow().get("x"), Some(Value::Int(2))));
        assert!(matches!(root.borrow().get("x"), Some(Value::Int(1))));
    }

    #[test]
    fn absent_name_resolves_to_none() {
        let root = Environment::root();
        assert!(root.borrow().get("missing").is_none());
    }
}
