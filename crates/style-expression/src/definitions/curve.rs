//! The `curve` expression kind.
//!
//! A curve maps a numeric input onto output values through an ordered list
//! of stops, blending between the bracketing stops according to an
//! interpolation strategy:
//!
//! ```json
//! ["curve", ["exponential", 1.5], ["get", "zoom"], 0.0, 12.0, 10.0, 44.0]
//! ```
//!
//! The first stop's output type binds every later stop, and interpolating
//! (non-stepped) curves only accept numeric, color, or numeric-array
//! outputs.

use crate::compile::{CompiledFn, CurveCategory};
use crate::error::EvalError;
use crate::expression::{Expression, ExpressionDefinition, Visitor};
use crate::parse::parse_expression;
use crate::parse_ctx::ParseCtx;
use crate::types::Type;
use serde_json::{json, Value};
use std::sync::Arc;

/// How outputs blend between two bracketing stops.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpolation {
    Step,
    Linear,
    Exponential { base: f64 },
    CubicBezier { control_points: [f64; 4] },
}

impl Interpolation {
    pub fn name(&self) -> &'static str {
        match self {
            Interpolation::Step => "step",
            Interpolation::Linear => "linear",
            Interpolation::Exponential { .. } => "exponential",
            Interpolation::CubicBezier { .. } => "cubic-bezier",
        }
    }

    /// The `{"name": ...}` descriptor handed to the runtime evaluator.
    pub fn descriptor(&self) -> Value {
        match self {
            Interpolation::Step => json!({"name": "step"}),
            Interpolation::Linear => json!({"name": "linear"}),
            Interpolation::Exponential { base } => {
                json!({"name": "exponential", "base": base})
            }
            Interpolation::CubicBezier { control_points } => {
                json!({"name": "cubic-bezier", "controlPoints": control_points})
            }
        }
    }

    /// The wire form: `["step"]`, `["linear"]`, `["exponential", base]` or
    /// `["cubic-bezier", c0, c1, c2, c3]`.
    fn serialize(&self) -> Value {
        match self {
            Interpolation::Step => json!(["step"]),
            Interpolation::Linear => json!(["linear"]),
            Interpolation::Exponential { base } => json!(["exponential", base]),
            Interpolation::CubicBezier {
                control_points: [c0, c1, c2, c3],
            } => json!(["cubic-bezier", c0, c1, c2, c3]),
        }
    }
}

/// A parsed curve: interpolation strategy, numeric input and ordered stops.
pub struct Curve {
    key: String,
    ty: Type,
    interpolation: Interpolation,
    input: Box<dyn Expression>,
    stops: Vec<(f64, Box<dyn Expression>)>,
}

pub fn definition() -> Arc<ExpressionDefinition> {
    Arc::new(ExpressionDefinition {
        name: "curve",
        parse_fn: parse,
    })
}

fn parse(args: &[Value], ctx: &ParseCtx) -> Option<Box<dyn Expression>> {
    if args.len() - 1 < 4 {
        ctx.error(format!(
            "Expected at least 4 arguments, but found only {}.",
            args.len() - 1
        ));
        return None;
    }

    let interpolation = parse_interpolation(&args[1], ctx)?;
    let input = parse_expression(
        Some(&args[2]),
        &ctx.concat(Some(2), Some(Type::Number), None),
    )?;

    let rest = &args[3..];
    let mut output_type = ctx.expected_type.clone();
    let mut stops: Vec<(f64, Box<dyn Expression>)> = Vec::new();

    let mut i = 0;
    while i < rest.len() {
        let label_key = i + 3;
        let value_key = i + 4;

        let label = match rest[i].as_f64() {
            Some(label) => label,
            None => {
                ctx.error_at(
                    &[label_key],
                    "Input/output pairs for \"curve\" expressions must be defined using \
                     literal numeric values.",
                );
                return None;
            }
        };

        if let Some((previous, _)) = stops.last() {
            // Strictly-less-than labels are rejected; equal labels pass.
            if *previous > label {
                ctx.error_at(
                    &[label_key],
                    "Input/output pairs for \"curve\" expressions must be arranged with \
                     input values in strictly ascending order.",
                );
                return None;
            }
        }

        let value = parse_expression(
            rest.get(i + 1),
            &ctx.concat(Some(value_key), output_type.clone(), None),
        )?;
        if output_type.is_none() {
            output_type = Some(value.ty().clone());
        }
        stops.push((label, value));
        i += 2;
    }

    let output_type = output_type?; // at least one stop parsed above

    if !matches!(interpolation, Interpolation::Step) && !is_interpolatable(&output_type) {
        ctx.error(format!(
            "Type {} is not interpolatable, and thus cannot be used as a {} curve's \
             output type.",
            output_type,
            interpolation.name()
        ));
        return None;
    }

    Some(Box::new(Curve {
        key: ctx.key.clone(),
        ty: output_type,
        interpolation,
        input,
        stops,
    }))
}

fn parse_interpolation(raw: &Value, ctx: &ParseCtx) -> Option<Interpolation> {
    let arr = match raw {
        Value::Array(arr) if !arr.is_empty() => arr,
        _ => {
            ctx.error_at(&[1], "Expected an interpolation type expression.");
            return None;
        }
    };
    match arr[0].as_str() {
        Some("step") => Some(Interpolation::Step),
        Some("linear") => Some(Interpolation::Linear),
        Some("exponential") => match arr.get(1).and_then(Value::as_f64) {
            Some(base) => Some(Interpolation::Exponential { base }),
            None => {
                ctx.error_at(&[1, 1], "Exponential interpolation requires a numeric base.");
                None
            }
        },
        Some("cubic-bezier") => {
            let controls: Vec<f64> = arr[1..].iter().filter_map(Value::as_f64).collect();
            if controls.len() != arr.len() - 1
                || controls.len() != 4
                || controls.iter().any(|c| !(0.0..=1.0).contains(c))
            {
                ctx.error_at(
                    &[1],
                    "Cubic bezier interpolation requires four numeric arguments with \
                     values between 0 and 1.",
                );
                return None;
            }
            Some(Interpolation::CubicBezier {
                control_points: [controls[0], controls[1], controls[2], controls[3]],
            })
        }
        _ => {
            ctx.error_at(
                &[1, 0],
                format!("Unknown interpolation type {}", tag_string(&arr[0])),
            );
            None
        }
    }
}

/// Only numeric, color, and numeric-array outputs can be blended.
fn is_interpolatable(ty: &Type) -> bool {
    match ty {
        Type::Number | Type::Color => true,
        Type::Array(item, _) => **item == Type::Number,
        _ => false,
    }
}

fn tag_string(tag: &Value) -> String {
    match tag {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Expression for Curve {
    fn key(&self) -> &str {
        &self.key
    }

    fn ty(&self) -> &Type {
        &self.ty
    }

    /// Compiles to a closure deferring to the environment's curve evaluator.
    ///
    /// Stop outputs compile to independent producers that the evaluator
    /// invokes only for the stops bracketing the input, so unused branches
    /// are never evaluated.
    fn compile(&self) -> CompiledFn {
        let input = self.input.compile();
        let labels: Vec<f64> = self.stops.iter().map(|(label, _)| *label).collect();
        let outputs: Vec<CompiledFn> = self
            .stops
            .iter()
            .map(|(_, expression)| expression.compile())
            .collect();
        let interpolation = self.interpolation.descriptor();
        let category = match &self.ty {
            Type::Color => CurveCategory::Color,
            Type::Array(_, _) => CurveCategory::Array,
            _ => CurveCategory::Number,
        };
        Box::new(move |env| {
            let evaluator = env.curve_evaluator().ok_or(EvalError::NoCurveEvaluator)?;
            let input = input(env)?;
            evaluator.evaluate_curve(env, &input, &labels, &outputs, &interpolation, category)
        })
    }

    fn serialize(&self) -> Value {
        let mut result = vec![
            json!("curve"),
            self.interpolation.serialize(),
            self.input.serialize(),
        ];
        for (label, expression) in &self.stops {
            result.push(json!(label));
            result.push(expression.serialize());
        }
        Value::Array(result)
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit(self);
        self.input.accept(visitor);
        for (_, expression) in &self.stops {
            expression.accept(visitor);
        }
    }
}
