//! The expression dispatcher.
//!
//! Normalizes raw JSON into expression nodes and dispatches by operator name
//! to a registered kind's parser, then enforces the context's expected type
//! through the subtype checker.

use crate::error::ParseError;
use crate::expression::{DefinitionMap, Expression};
use crate::parse_ctx::ParseCtx;
use crate::types::Type;
use serde_json::{json, Value};
use std::sync::Arc;

/// Parses one raw JSON value into a typed expression.
///
/// Scalars (`null`, strings, booleans, numbers) are wrapped as
/// `["literal", value]` before dispatch. `None` models an absent element
/// (JSON `undefined` has no `serde_json` encoding) and is invalid. On any
/// failure exactly one diagnostic has been recorded on `ctx` and `None` is
/// returned; callers propagate the `None` without re-reporting.
pub fn parse_expression(raw: Option<&Value>, ctx: &ParseCtx) -> Option<Box<dyn Expression>> {
    let raw = match raw {
        Some(raw) => raw,
        None => {
            ctx.error("'undefined' value invalid. Use null instead.");
            return None;
        }
    };

    let wrapped;
    let expr = match raw {
        Value::Null | Value::String(_) | Value::Bool(_) | Value::Number(_) => {
            wrapped = json!(["literal", raw]);
            &wrapped
        }
        _ => raw,
    };

    if let Value::Array(arr) = expr {
        if arr.is_empty() {
            ctx.error(
                "Expected an array with at least one element. \
                 If you wanted a literal array, use [\"literal\", []].",
            );
            return None;
        }
        let op = match &arr[0] {
            Value::String(op) => op,
            other => {
                ctx.error_at(
                    &[0],
                    format!(
                        "Expression name must be a string, but found {} instead. \
                         If you wanted a literal array, use [\"literal\", [...]].",
                        json_type_name(other)
                    ),
                );
                return None;
            }
        };
        let definition = match ctx.definitions.get(op.as_str()) {
            Some(definition) => Arc::clone(definition),
            None => {
                ctx.error_at(
                    &[0],
                    format!(
                        "Unknown expression \"{op}\". \
                         If you wanted a literal array, use [\"literal\", [...]]."
                    ),
                );
                return None;
            }
        };
        let parsed = (definition.parse_fn)(arr, ctx)?;
        if let Some(expected) = &ctx.expected_type {
            if ctx.check_subtype(expected, parsed.ty()) {
                return None;
            }
        }
        Some(parsed)
    } else {
        // Scalars were wrapped above; only bare objects remain.
        ctx.error("Bare objects invalid. Use [\"literal\", {...}] instead.");
        None
    }
}

/// Parses a complete top-level expression.
///
/// Builds the root context over `definitions` and returns either the typed
/// expression tree or every diagnostic the parse recorded. The outcomes are
/// mutually exclusive: a returned tree means no diagnostic was produced.
pub fn parse(
    raw: &Value,
    definitions: Arc<DefinitionMap>,
    expected_type: Option<Type>,
) -> Result<Box<dyn Expression>, Vec<ParseError>> {
    let ctx = ParseCtx::new(definitions, expected_type);
    match parse_expression(Some(raw), &ctx) {
        Some(expression) => Ok(expression),
        None => Err(ctx.take_errors()),
    }
}

/// Returns the JSON kind name of a value, for diagnostics.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
