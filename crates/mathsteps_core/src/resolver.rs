//! Resolution chain - ordered fallback across solving backends.
//!
//! External services are best-effort: they may be down, rate-limited or
//! unauthenticated. The chain tries each backend once, in order, and the
//! local evaluator at the end guarantees trivial arithmetic always works.

use crate::config::SolverConfig;
use crate::error::SolveError;
use crate::evaluator::LocalEvaluator;
use crate::providers::{Provider, StepsApiProvider, WolframProvider};
use crate::solution::SolveResult;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct Resolver {
    providers: Vec<Box<dyn Provider>>,
}

impl Resolver {
    /// Build the standard chain from configuration: Wolfram Alpha when a
    /// real credential is present, then the algebra-steps service, then the
    /// local evaluator.
    pub fn from_config(config: &SolverConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let mut providers: Vec<Box<dyn Provider>> = Vec::new();

        if let Some(app_id) = config.active_wolfram_app_id() {
            providers.push(Box::new(WolframProvider::with_base_url(
                app_id,
                config.wolfram_base_url.as_str(),
                timeout,
            )?));
        }

        providers.push(Box::new(StepsApiProvider::with_base_url(
            config.steps_api_url.as_str(),
            timeout,
        )?));
        providers.push(Box::new(LocalEvaluator::new()));

        Ok(Self { providers })
    }

    /// Build a chain over an explicit provider list. Used by tests and by
    /// embedders with custom backends.
    pub fn with_providers(providers: Vec<Box<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Try each provider once, in order; first success wins.
    ///
    /// Per-provider failures are logged and swallowed. Only the last
    /// provider's error propagates; an empty chain reports `Unsolvable`.
    /// Nothing is retried - the caller decides whether to resubmit.
    pub async fn resolve(&self, problem: &str) -> Result<SolveResult, SolveError> {
        let mut last_error = SolveError::Unsolvable;

        for provider in &self.providers {
            debug!("Trying provider: {}", provider.name());
            match provider.solve(problem).await {
                Ok(result) => {
                    info!("Problem solved by {}", provider.name());
                    return Ok(result);
                }
                Err(e) => {
                    warn!("Provider {} failed: {}", provider.name(), e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
