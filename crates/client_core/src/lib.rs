use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::CatReport,
    error::ApiError,
    protocol::{assess_route, reports_route, AssessmentResult, ReportList},
};

pub mod render;
pub mod report_list;
pub mod submission;

pub use report_list::{ReportListState, ReportListView};
pub use submission::{SubmissionOutcome, SubmissionPhase, SubmissionState, SubmissionView};

pub const SUBMIT_FAILURE_MESSAGE: &str = "Failed to generate assessment.";
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch reports.";

/// What the views need from the gateway. Errors carry the user-visible
/// message in their `Display` output.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn submit_assessment(&self, cat_description: &str) -> Result<AssessmentResult>;
    async fn fetch_reports(&self) -> Result<Vec<CatReport>>;
}

#[async_trait]
impl<T> GatewayClient for Arc<T>
where
    T: GatewayClient + ?Sized,
{
    async fn submit_assessment(&self, cat_description: &str) -> Result<AssessmentResult> {
        (**self).submit_assessment(cat_description).await
    }

    async fn fetch_reports(&self) -> Result<Vec<CatReport>> {
        (**self).fetch_reports().await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest<'a> {
    cat_description: &'a str,
}

/// Talks to a gateway over its JSON surface.
pub struct HttpGatewayClient {
    http: Client,
    base_url: String,
}

impl HttpGatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn submit_assessment(&self, cat_description: &str) -> Result<AssessmentResult> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, assess_route()))
            .json(&SubmitRequest { cat_description })
            .send()
            .await
            .context("failed to reach the assessment gateway")?;
        decode(response, SUBMIT_FAILURE_MESSAGE).await
    }

    async fn fetch_reports(&self) -> Result<Vec<CatReport>> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, reports_route()))
            .send()
            .await
            .context("failed to reach the report gateway")?;
        let list: ReportList = decode(response, FETCH_FAILURE_MESSAGE).await?;
        Ok(list.reports)
    }
}

async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T> {
    if !response.status().is_success() {
        let message = response
            .json::<ApiError>()
            .await
            .ok()
            .map(|body| body.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(anyhow!(message));
    }

    response
        .json()
        .await
        .context("gateway returned an unreadable response")
}

#[cfg(test)]
#[path = "tests/fakes.rs"]
mod fakes;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
