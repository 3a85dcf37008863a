use thiserror::Error;

/// A positioned parse diagnostic.
///
/// `key` addresses the offending JSON node as a chain of bracketed indices
/// from the parse root, e.g. `[3][1]`. The root itself has the empty key.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{key}: {message}")]
pub struct ParseError {
    pub key: String,
    pub message: String,
}

/// Errors surfaced when a compiled expression is evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A curve was evaluated against an environment without an installed
    /// curve evaluator.
    #[error("No curve evaluator installed.")]
    NoCurveEvaluator,

    /// A failure reported by the host's evaluation primitive.
    #[error("{0}")]
    Evaluator(String),
}
