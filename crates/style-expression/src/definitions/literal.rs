//! The `literal` expression kind.
//!
//! Scalars reach this kind automatically through the dispatcher's implicit
//! wrapping; arrays and objects require the explicit `["literal", value]`
//! form to distinguish them from operator expressions.

use crate::color::Color;
use crate::compile::CompiledFn;
use crate::expression::{Expression, ExpressionDefinition, Visitor};
use crate::parse_ctx::ParseCtx;
use crate::types::{type_of, Type};
use serde_json::{json, Value};
use std::sync::Arc;

/// A constant JSON value with its structural type.
pub struct Literal {
    key: String,
    ty: Type,
    value: Value,
    /// Set when a string literal resolved to a color under an expected
    /// `Color` type.
    color: Option<Color>,
}

pub fn definition() -> Arc<ExpressionDefinition> {
    Arc::new(ExpressionDefinition {
        name: "literal",
        parse_fn: parse,
    })
}

fn parse(args: &[Value], ctx: &ParseCtx) -> Option<Box<dyn Expression>> {
    if args.len() != 2 {
        ctx.error(format!(
            "'literal' expression requires exactly one argument, but found {} instead.",
            args.len() - 1
        ));
        return None;
    }
    let value = args[1].clone();
    let mut ty = type_of(&value);
    let mut color = None;

    match (&ctx.expected_type, &value) {
        // A color-typed position accepts any recognizable CSS color string.
        (Some(Type::Color), Value::String(s)) => {
            if let Some(parsed) = Color::parse(s) {
                ty = Type::Color;
                color = Some(parsed);
            }
        }
        // An empty array literal adopts a compatible expected array type,
        // since its item type cannot be inferred from zero elements.
        (Some(expected @ Type::Array(_, length)), Value::Array(items))
            if items.is_empty() && length.map_or(true, |length| length == 0) =>
        {
            ty = expected.clone();
        }
        _ => {}
    }

    Some(Box::new(Literal {
        key: ctx.key.clone(),
        ty,
        value,
        color,
    }))
}

impl Expression for Literal {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        &self.ty
    }

    fn compile(&self) -> CompiledFn {
        let value = match &self.color {
            Some(color) => color.to_json(),
            None => self.value.clone(),
        };
        Box::new(move |_env| Ok(value.clone()))
    }

    fn serialize(&self) -> Value {
        // Scalars round-trip bare; arrays and objects keep the explicit
        // wrapper so they do not re-parse as operator expressions.
        match &self.value {
            Value::Array(_) | Value::Object(_) => json!(["literal", self.value]),
            scalar => scalar.clone(),
        }
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit(self);
    }
}
