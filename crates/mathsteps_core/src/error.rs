//! Error types for the resolution pipeline.

use thiserror::Error;

/// Failures a solving backend can report.
///
/// `ProviderUnavailable` and `MalformedResponse` are recovered by the chain
/// falling through to the next backend. `InvalidExpression` comes from the
/// local evaluator, the last backend, and is therefore terminal.
#[derive(Debug, Clone, Error)]
pub enum SolveError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Invalid arithmetic expression: {0}")]
    InvalidExpression(String),

    #[error("No provider could solve the problem")]
    Unsolvable,
}

/// Failure from the math markup engine. Never escapes the renderer; the
/// affected fragment degrades to escaped plain text instead.
#[derive(Debug, Clone, Error)]
#[error("Math rendering failed: {0}")]
pub struct RenderError(pub String);
