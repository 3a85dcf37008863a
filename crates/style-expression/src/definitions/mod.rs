//! The built-in expression kinds.

pub mod curve;
pub mod get;
pub mod literal;

use crate::expression::{definitions_to_map, DefinitionMap, ExpressionDefinition};
use std::sync::Arc;

/// Every built-in expression kind.
pub fn all_definitions() -> Vec<Arc<ExpressionDefinition>> {
    vec![
        literal::definition(),
        get::definition(),
        curve::definition(),
    ]
}

/// Builds the default operator registry.
///
/// Hosts extend the language by inserting their own
/// [`ExpressionDefinition`]s into the returned map before parsing.
pub fn definitions_map() -> DefinitionMap {
    definitions_to_map(all_definitions())
}
