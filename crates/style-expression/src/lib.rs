//! Styling expression parser: the parsing, type-checking and compilation
//! core of a JSON-encoded styling expression language.
//!
//! # Overview
//!
//! Expressions are JSON arrays of the form `[operator, ...args]`; scalars
//! are implicit literals. Parsing is a recursive descent over the raw JSON
//! driven by an operator registry, producing a typed expression tree whose
//! every node supports compilation to a runtime-evaluable closure,
//! serialization back to the wire form, and visitor traversal. Diagnostics
//! accumulate in one shared list, each addressed by the exact index path of
//! the offending node.
//!
//! The `curve` kind maps a numeric input onto outputs through ordered,
//! strictly ascending stops, with step, linear, exponential or cubic-bezier
//! blending between the bracketing stops. The interpolation mathematics
//! live in the host: compiled curves defer to a [`CurveEvaluator`] installed
//! on the evaluation environment.
//!
//! # Example
//!
//! ```
//! use style_expression::{definitions_map, parse, Type};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let raw = json!(["curve", ["linear"], ["get", "zoom"], 0.0, 0.5, 10.0, 1.5]);
//! let definitions = Arc::new(definitions_map());
//! let expression = parse(&raw, definitions, Some(Type::Number)).unwrap();
//!
//! assert_eq!(*expression.ty(), Type::Number);
//! assert_eq!(expression.serialize(), raw);
//! ```

pub mod color;
pub mod compile;
pub mod definitions;
pub mod error;
pub mod expression;
pub mod parse;
pub mod parse_ctx;
pub mod scope;
pub mod types;

// Re-export the core public API
pub use color::Color;
pub use compile::{CompiledFn, CurveCategory, CurveEvaluator, EvalEnv};
pub use definitions::definitions_map;
pub use error::{EvalError, ParseError};
pub use expression::{DefinitionMap, Expression, ExpressionDefinition, ParseFn, Visitor};
pub use parse::{parse, parse_expression};
pub use parse_ctx::ParseCtx;
pub use scope::Scope;
pub use types::{check_subtype, type_of, Type};
