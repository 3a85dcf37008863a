//! The runtime-evaluable form of compiled expressions.
//!
//! Compiling an expression yields a [`CompiledFn`]: a shareable closure from
//! an evaluation environment to a JSON value. Curve expressions additionally
//! need an interpolation primitive, which the host installs on the
//! environment as a [`CurveEvaluator`]; the parsing core itself performs no
//! interpolation mathematics.

use crate::error::EvalError;
use serde_json::Value;
use std::sync::Arc;

/// A compiled expression: immutable, side-effect free, safe to call
/// concurrently through shared references.
pub type CompiledFn = Box<dyn Fn(&EvalEnv) -> Result<Value, EvalError> + Send + Sync>;

/// Coarse output category of a compiled curve, telling the evaluator how to
/// blend bracketing stop outputs: per channel, per element, or as a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveCategory {
    Number,
    Color,
    Array,
}

impl CurveCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveCategory::Number => "number",
            CurveCategory::Color => "color",
            CurveCategory::Array => "array",
        }
    }
}

/// The host-supplied interpolation primitive.
///
/// Given the evaluated curve input, the ordered stop labels, the per-stop
/// output producers, the serialized strategy descriptor and the output
/// category, an implementation locates the stops bracketing `input`,
/// computes the strategy's interpolation factor and blends the bracketing
/// outputs (or passes the lower one through for stepped curves).
///
/// `outputs` must be invoked lazily: only the producers for the one or two
/// bracketing stops actually selected.
pub trait CurveEvaluator: Send + Sync {
    fn evaluate_curve(
        &self,
        env: &EvalEnv,
        input: &Value,
        labels: &[f64],
        outputs: &[CompiledFn],
        interpolation: &Value,
        category: CurveCategory,
    ) -> Result<Value, EvalError>;
}

/// The data a compiled expression is evaluated against.
pub struct EvalEnv {
    properties: Value,
    curve_evaluator: Option<Arc<dyn CurveEvaluator>>,
}

impl EvalEnv {
    /// Creates an environment over a host data object.
    pub fn new(properties: Value) -> Self {
        EvalEnv {
            properties,
            curve_evaluator: None,
        }
    }

    /// Installs the interpolation primitive that compiled curves defer to.
    pub fn with_curve_evaluator(mut self, evaluator: Arc<dyn CurveEvaluator>) -> Self {
        self.curve_evaluator = Some(evaluator);
        self
    }

    /// Looks up a named property of the host data object.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// The installed interpolation primitive, if any.
    pub fn curve_evaluator(&self) -> Option<&Arc<dyn CurveEvaluator>> {
        self.curve_evaluator.as_ref()
    }
}
