//! The expression capability surface and the kind registry.

use crate::compile::CompiledFn;
use crate::parse_ctx::ParseCtx;
use crate::types::Type;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A typed node in a parsed expression tree.
///
/// Every kind records its source position (`key`) and resolved type at parse
/// time, and supports the remaining capabilities: compilation to a
/// runtime-evaluable closure, serialization back to the JSON wire form, and
/// visitor traversal. Nodes are immutable after construction and own their
/// children exclusively.
pub trait Expression {
    /// The bracketed source path of this node, e.g. `[3][1]`.
    fn key(&self) -> &str;

    /// The resolved type of this node.
    fn ty(&self) -> &Type;

    /// Compiles this node into its runtime-evaluable form.
    fn compile(&self) -> CompiledFn;

    /// Serializes this node back to its JSON wire form.
    fn serialize(&self) -> Value;

    /// Visits this node, then its children in source order.
    fn accept(&self, visitor: &mut dyn Visitor);
}

/// A read-only traversal over an expression tree.
pub trait Visitor {
    fn visit(&mut self, expression: &dyn Expression);
}

/// The parse entry point of one expression kind.
///
/// `args` is the full expression array, operator name included at index 0.
/// A failed parse records its diagnostics on `ctx` and returns `None`.
pub type ParseFn = fn(&[Value], &ParseCtx) -> Option<Box<dyn Expression>>;

/// A registered expression kind.
pub struct ExpressionDefinition {
    pub name: &'static str,
    pub parse_fn: ParseFn,
}

/// Map of operator name -> expression kind, shared read-only by a whole
/// parse (and freely across parses).
pub type DefinitionMap = HashMap<String, Arc<ExpressionDefinition>>;

/// Builds a `DefinitionMap` from a list of expression kinds.
pub fn definitions_to_map(definitions: Vec<Arc<ExpressionDefinition>>) -> DefinitionMap {
    let mut map = HashMap::new();
    for definition in definitions {
        map.insert(definition.name.to_string(), Arc::clone(&definition));
    }
    map
}
