//! The state threaded through one recursive parse.

use crate::error::ParseError;
use crate::expression::{DefinitionMap, Expression};
use crate::scope::Scope;
use crate::types::{check_subtype, Type};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// The parsing context.
///
/// Derived child contexts share the definition registry, the scope chain and
/// the single diagnostics list; only the path (and with it the derived key)
/// and the expected type change per child. One root context exists per
/// top-level parse; children are cheap values that die with the recursive
/// call that created them.
pub struct ParseCtx {
    /// Operator name -> expression kind, read-only for the whole parse.
    pub definitions: Arc<DefinitionMap>,
    /// Indices from the parse root down to the current node.
    pub path: Vec<usize>,
    /// `path` rendered as a bracketed address, e.g. `[3][1]`.
    pub key: String,
    /// Named expression bindings visible at this position.
    pub scope: Rc<Scope>,
    /// The type this position must produce, when the parent constrains it.
    pub expected_type: Option<Type>,
    /// Diagnostics sink shared by reference across every context of the
    /// parse, so the root caller sees every record after one call returns.
    pub errors: Rc<RefCell<Vec<ParseError>>>,
}

impl ParseCtx {
    /// Creates the root context for one top-level parse.
    pub fn new(definitions: Arc<DefinitionMap>, expected_type: Option<Type>) -> Self {
        ParseCtx {
            definitions,
            path: Vec::new(),
            key: String::new(),
            scope: Scope::root(),
            expected_type,
            errors: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Derives the context for a child position.
    ///
    /// `index` extends the path (`None` keeps the current position),
    /// `expected` sets the child's expected type, and `bindings` opens a new
    /// scope frame over the current one.
    pub fn concat(
        &self,
        index: Option<usize>,
        expected: Option<Type>,
        bindings: Option<Vec<(String, Rc<dyn Expression>)>>,
    ) -> ParseCtx {
        let mut path = self.path.clone();
        if let Some(index) = index {
            path.push(index);
        }
        let key = path.iter().map(|part| format!("[{part}]")).collect();
        ParseCtx {
            definitions: Arc::clone(&self.definitions),
            path,
            key,
            scope: match bindings {
                Some(bindings) => self.scope.concat(bindings),
                None => Rc::clone(&self.scope),
            },
            expected_type: expected,
            errors: Rc::clone(&self.errors),
        }
    }

    /// Records one diagnostic at the current position.
    pub fn error(&self, message: impl Into<String>) {
        self.error_at(&[], message);
    }

    /// Records one diagnostic at a position below the current one.
    pub fn error_at(&self, keys: &[usize], message: impl Into<String>) {
        let mut key = self.key.clone();
        for k in keys {
            key.push_str(&format!("[{k}]"));
        }
        self.errors.borrow_mut().push(ParseError {
            key,
            message: message.into(),
        });
    }

    /// Runs the subtype checker with this context as the diagnostics sink.
    ///
    /// Returns true when the check failed, in which case exactly one
    /// diagnostic has been recorded.
    pub fn check_subtype(&self, expected: &Type, actual: &Type) -> bool {
        match check_subtype(expected, actual) {
            Ok(()) => false,
            Err(message) => {
                self.error(message);
                true
            }
        }
    }

    /// Drains the accumulated diagnostics.
    pub fn take_errors(&self) -> Vec<ParseError> {
        self.errors.borrow_mut().drain(..).collect()
    }
}
