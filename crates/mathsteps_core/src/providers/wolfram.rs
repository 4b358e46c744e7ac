//! Wolfram Alpha adapter - normalizes pod-based query results.

use crate::error::SolveError;
use crate::providers::Provider;
use crate::solution::{SolveResult, Step};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.wolframalpha.com";

/// Pod titles that carry the final answer. When several match, the last
/// one wins.
const SOLUTION_TITLES: [&str; 4] = ["Result", "Solution", "Derivative", "Integral"];

/// Sentinel used when no solution pod matched.
const NO_SOLUTION: &str = "No solution found";

pub struct WolframProvider {
    app_id: String,
    base_url: String,
    http: reqwest::Client,
}

/// The slice of the query response this adapter consumes.
#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    queryresult: QueryResult,
}

#[derive(Debug, Default, Deserialize)]
struct QueryResult {
    #[serde(default)]
    pods: Vec<Pod>,
}

#[derive(Debug, Default, Deserialize)]
struct Pod {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subpods: Vec<Subpod>,
}

#[derive(Debug, Default, Deserialize)]
struct Subpod {
    #[serde(default)]
    plaintext: String,
}

impl WolframProvider {
    pub fn new(app_id: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::with_base_url(app_id, DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(
        app_id: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            app_id: app_id.into(),
            base_url: base_url.into(),
            http,
        })
    }
}

#[async_trait]
impl Provider for WolframProvider {
    fn name(&self) -> &'static str {
        "wolfram"
    }

    async fn solve(&self, problem: &str) -> Result<SolveResult, SolveError> {
        let url = format!("{}/v2/query", self.base_url);
        debug!("Querying Wolfram Alpha");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("input", problem),
                ("format", "plaintext"),
                ("output", "JSON"),
                ("appid", self.app_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                SolveError::ProviderUnavailable(format!("Wolfram Alpha request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(SolveError::ProviderUnavailable(format!(
                "HTTP {} from Wolfram Alpha",
                response.status()
            )));
        }

        let payload: QueryResponse = response.json().await.map_err(|e| {
            SolveError::MalformedResponse(format!("Wolfram Alpha payload: {}", e))
        })?;

        Ok(normalize(payload))
    }
}

/// Turn a pod sequence into canonical steps: one labeled step per pod with
/// plain-text content, the solution taken from the last matching answer pod.
fn normalize(payload: QueryResponse) -> SolveResult {
    let mut steps = Vec::new();
    let mut solution = Step::from_raw(NO_SOLUTION);

    for pod in payload.queryresult.pods {
        let content = pod
            .subpods
            .first()
            .map(|s| s.plaintext.as_str())
            .unwrap_or_default();
        if content.is_empty() {
            continue;
        }

        steps.push(Step::labeled(pod.title.as_str(), content));

        if SOLUTION_TITLES.contains(&pod.title.as_str()) {
            solution = Step::from_raw(content);
        }
    }

    SolveResult::new(steps, solution)
}
