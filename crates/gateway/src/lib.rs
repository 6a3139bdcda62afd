use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;
use shared::{error::ApiException, protocol::AssessmentRequest};
use tracing::{debug, error};

pub mod upstream;

pub use upstream::{
    AssessmentService, HttpAssessmentService, HttpReportStore, ReportStore, UpstreamError,
};

pub const ASSESSMENT_FALLBACK_MESSAGE: &str = "Failed to get response from assessment service.";
pub const REPORTS_FALLBACK_MESSAGE: &str = "Failed to fetch reports from report store.";

#[derive(Clone)]
pub struct GatewayContext {
    pub assessment: Arc<dyn AssessmentService>,
    pub reports: Arc<dyn ReportStore>,
}

impl GatewayContext {
    pub fn new(assessment: Arc<dyn AssessmentService>, reports: Arc<dyn ReportStore>) -> Self {
        Self {
            assessment,
            reports,
        }
    }

    pub fn over_http(
        http: Client,
        assessment_url: impl Into<String>,
        reports_url: impl Into<String>,
    ) -> Self {
        Self::new(
            Arc::new(HttpAssessmentService::new(http.clone(), assessment_url)),
            Arc::new(HttpReportStore::new(http, reports_url)),
        )
    }
}

/// Validates a raw `{ catDescription }` body and forwards it to the
/// assessment service. A 2xx upstream body is returned untouched.
pub async fn assess(ctx: &GatewayContext, body: &[u8]) -> Result<Value, ApiException> {
    let request = AssessmentRequest::from_json(body).inspect_err(|_| {
        debug!("rejecting assessment request without a usable description");
    })?;
    forward_assessment(ctx, &request).await
}

/// Forwards an already validated request; one outbound call.
pub async fn forward_assessment(
    ctx: &GatewayContext,
    request: &AssessmentRequest,
) -> Result<Value, ApiException> {
    debug!(
        description_len = request.cat_description.len(),
        "forwarding assessment request"
    );
    ctx.assessment
        .assess(request)
        .await
        .map_err(|err| normalize(err, "assessment", ASSESSMENT_FALLBACK_MESSAGE))
}

pub async fn list_reports(ctx: &GatewayContext) -> Result<Value, ApiException> {
    ctx.reports
        .list_reports()
        .await
        .map_err(|err| normalize(err, "report_store", REPORTS_FALLBACK_MESSAGE))
}

fn normalize(err: UpstreamError, upstream: &'static str, fallback: &str) -> ApiException {
    match err {
        UpstreamError::Rejected { status, message } => {
            error!(
                upstream,
                status,
                message = message.as_deref().unwrap_or_default(),
                "upstream rejected request"
            );
            ApiException::upstream(status, message.unwrap_or_else(|| fallback.to_string()))
        }
        other => {
            error!(upstream, error = %other, "upstream call failed");
            ApiException::internal()
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
