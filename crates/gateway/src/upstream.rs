//! Capability interfaces for the two external services, plus their
//! reqwest-backed implementations.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde_json::Value;
use shared::protocol::{upstream_error_message, AssessmentRequest};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream responded with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("upstream unreachable: {0}")]
    Unreachable(String),
    #[error("malformed upstream body: {0}")]
    MalformedBody(String),
}

/// Natural-language triage engine.
#[async_trait]
pub trait AssessmentService: Send + Sync {
    async fn assess(&self, request: &AssessmentRequest) -> Result<Value, UpstreamError>;
}

/// System of record for persisted cat reports.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn list_reports(&self) -> Result<Value, UpstreamError>;
}

pub struct HttpAssessmentService {
    http: Client,
    endpoint: String,
}

impl HttpAssessmentService {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl AssessmentService for HttpAssessmentService {
    async fn assess(&self, request: &AssessmentRequest) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;
        read_json(response).await
    }
}

pub struct HttpReportStore {
    http: Client,
    endpoint: String,
}

impl HttpReportStore {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ReportStore for HttpReportStore {
    async fn list_reports(&self) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;
        read_json(response).await
    }
}

async fn read_json(response: Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

    if !status.is_success() {
        return Err(UpstreamError::Rejected {
            status: status.as_u16(),
            message: upstream_error_message(&body),
        });
    }

    serde_json::from_slice(&body).map_err(|e| UpstreamError::MalformedBody(e.to_string()))
}

#[cfg(test)]
#[path = "tests/upstream_tests.rs"]
mod tests;
