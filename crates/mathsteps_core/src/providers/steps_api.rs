//! Algebra-steps service adapter - the generic solve endpoint.
//!
//! The service already speaks the canonical shape, so normalization is a
//! straight decode; the work here is mapping transport and status failures
//! onto the chain's error taxonomy.

use crate::error::SolveError;
use crate::providers::Provider;
use crate::solution::{SolveResult, Step};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://algebra-steps-api.onrender.com";

pub struct StepsApiProvider {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SolveResponse {
    steps: Vec<Step>,
    solution: Step,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl StepsApiProvider {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    fn decode(status: reqwest::StatusCode, body: &str) -> Result<SolveResult, SolveError> {
        if !status.is_success() {
            // A structured error body carries the service's own message.
            if let Ok(err) = serde_json::from_str::<ErrorResponse>(body) {
                return Err(SolveError::ProviderUnavailable(err.error));
            }
            return Err(SolveError::MalformedResponse(format!(
                "HTTP {} from solve endpoint",
                status
            )));
        }

        let payload: SolveResponse = serde_json::from_str(body)
            .map_err(|e| SolveError::MalformedResponse(format!("solve payload: {}", e)))?;

        Ok(SolveResult::new(payload.steps, payload.solution))
    }
}

#[async_trait]
impl Provider for StepsApiProvider {
    fn name(&self) -> &'static str {
        "steps-api"
    }

    async fn solve(&self, problem: &str) -> Result<SolveResult, SolveError> {
        let url = format!("{}/solve", self.base_url);
        debug!("Posting problem to solve endpoint");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "problem": problem }))
            .send()
            .await
            .map_err(|e| {
                SolveError::ProviderUnavailable(format!("solve request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SolveError::ProviderUnavailable(format!("solve response read failed: {}", e))
        })?;

        Self::decode(status, &body)
    }
}
