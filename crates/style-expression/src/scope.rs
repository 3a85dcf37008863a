//! The chain of named expression bindings visible at a parse position.

use crate::expression::Expression;
use std::collections::HashMap;
use std::rc::Rc;

/// One frame in the binding chain.
///
/// Frames are immutable once built: introducing bindings always creates a
/// new child frame via [`Scope::concat`], so sibling contexts may share a
/// parent frame freely. Names are unique within a frame; a child frame may
/// shadow a name bound further up the chain.
pub struct Scope {
    parent: Option<Rc<Scope>>,
    bindings: HashMap<String, Rc<dyn Expression>>,
}

impl Scope {
    /// Creates the empty root frame.
    pub fn root() -> Rc<Scope> {
        Rc::new(Scope {
            parent: None,
            bindings: HashMap::new(),
        })
    }

    /// Creates a child frame holding `bindings` on top of `self`.
    pub fn concat(self: &Rc<Self>, bindings: Vec<(String, Rc<dyn Expression>)>) -> Rc<Scope> {
        Rc::new(Scope {
            parent: Some(Rc::clone(self)),
            bindings: bindings.into_iter().collect(),
        })
    }

    /// Returns the nearest binding for `name`, walking child to root.
    ///
    /// Callers must check [`Scope::has`] first: looking up an unbound name
    /// is a programming error, not an input error, and panics.
    pub fn get(&self, name: &str) -> Rc<dyn Expression> {
        if let Some(expression) = self.bindings.get(name) {
            return Rc::clone(expression);
        }
        match &self.parent {
            Some(parent) => parent.get(name),
            None => panic!("{name} not found in scope."),
        }
    }

    /// Returns true if `name` is bound in this frame or any ancestor.
    pub fn has(&self, name: &str) -> bool {
        if self.bindings.contains_key(name) {
            return true;
        }
        match &self.parent {
            Some(parent) => parent.has(name),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::definitions_map;
    use crate::parse::parse;
    use crate::types::Type;
    use serde_json::json;
    use std::sync::Arc;

    fn literal(value: serde_json::Value) -> Rc<dyn Expression> {
        let definitions = Arc::new(definitions_map());
        Rc::from(parse(&value, definitions, None).unwrap())
    }

    #[test]
    fn test_get_walks_to_root() {
        let root = Scope::root();
        let outer = root.concat(vec![("a".to_string(), literal(json!(1.0)))]);
        let inner = outer.concat(vec![("b".to_string(), literal(json!(2.0)))]);

        assert!(inner.has("a"));
        assert!(inner.has("b"));
        assert!(!inner.has("c"));
        assert_eq!(*inner.get("a").ty(), Type::Number);
    }

    #[test]
    fn test_child_frame_shadows_parent() {
        let root = Scope::root();
        let outer = root.concat(vec![("a".to_string(), literal(json!(1.0)))]);
        let inner = outer.concat(vec![("a".to_string(), literal(json!("shadowed")))]);

        assert_eq!(*inner.get("a").ty(), Type::String);
        assert_eq!(*outer.get("a").ty(), Type::Number);
    }

    #[test]
    #[should_panic(expected = "missing not found in scope.")]
    fn test_unchecked_get_panics() {
        Scope::root().get("missing");
    }
}
