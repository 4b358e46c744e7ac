//! Solving backends - one adapter per external service.
//!
//! Each adapter translates its provider-specific response into the
//! canonical `SolveResult` shape. Adapters hold no shared mutable state and
//! every invocation is independent, so a failed attempt never poisons the
//! next one.

mod steps_api;
mod wolfram;

pub use steps_api::StepsApiProvider;
pub use wolfram::WolframProvider;

use crate::error::SolveError;
use crate::solution::SolveResult;
use async_trait::async_trait;

/// An interchangeable backend capable of attempting to solve a problem.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short name used in chain logs.
    fn name(&self) -> &'static str;

    /// Attempt to solve the problem, normalized into the canonical result.
    async fn solve(&self, problem: &str) -> Result<SolveResult, SolveError>;
}
