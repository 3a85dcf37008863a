//! The `get` expression kind: property lookup in the host data object.

use crate::compile::CompiledFn;
use crate::expression::{Expression, ExpressionDefinition, Visitor};
use crate::parse_ctx::ParseCtx;
use crate::types::Type;
use serde_json::{json, Value};
use std::sync::Arc;

/// `["get", name]` reads a named property at evaluation time.
pub struct Get {
    key: String,
    ty: Type,
    name: String,
}

pub fn definition() -> Arc<ExpressionDefinition> {
    Arc::new(ExpressionDefinition {
        name: "get",
        parse_fn: parse,
    })
}

fn parse(args: &[Value], ctx: &ParseCtx) -> Option<Box<dyn Expression>> {
    if args.len() != 2 {
        ctx.error(format!(
            "'get' expression requires exactly one argument, but found {} instead.",
            args.len() - 1
        ));
        return None;
    }
    let name = match &args[1] {
        Value::String(name) => name.clone(),
        _ => {
            ctx.error_at(&[1], "Property name must be a string.");
            return None;
        }
    };
    // The looked-up value is only known at evaluation time; adopt the
    // position's expected type and leave the shape check to the host.
    let ty = ctx.expected_type.clone().unwrap_or(Type::Value);
    Some(Box::new(Get {
        key: ctx.key.clone(),
        ty,
        name,
    }))
}

impl Expression for Get {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        &self.ty
    }

    fn compile(&self) -> CompiledFn {
        let name = self.name.clone();
        Box::new(move |env| Ok(env.property(&name).cloned().unwrap_or(Value::Null)))
    }

    fn serialize(&self) -> Value {
        json!(["get", self.name])
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit(self);
    }
}
