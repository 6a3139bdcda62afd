use serde::{Deserialize, Serialize};

use crate::{
    domain::{null_as_default, CatReport},
    error::ApiException,
};

pub fn assess_route() -> &'static str {
    "/assess"
}

pub fn reports_route() -> &'static str {
    "/reports"
}

pub fn submission_page_route() -> &'static str {
    "/"
}

pub fn report_list_page_route() -> &'static str {
    "/all-reports"
}

/// Body of `POST /assess` and of the call to the assessment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub cat_description: String,
}

impl AssessmentRequest {
    /// Parses and validates a raw request body. The description must be a
    /// string that is non-empty after trimming; it is kept untrimmed.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiException> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|_| ApiException::validation())?;
        let description = value
            .get("catDescription")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(ApiException::validation)?;
        Self::new(description)
    }

    pub fn new(cat_description: impl Into<String>) -> Result<Self, ApiException> {
        let cat_description = cat_description.into();
        if cat_description.trim().is_empty() {
            return Err(ApiException::validation());
        }
        Ok(Self { cat_description })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub assessment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub immediate_care_steps: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_categories: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: String,
}

impl AssessmentResult {
    pub fn is_empty(&self) -> bool {
        self.assessment.is_empty()
            && self.immediate_care_steps.is_empty()
            && self.resource_categories.is_empty()
            && self.keywords.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportList {
    #[serde(default)]
    pub reports: Vec<CatReport>,
}

/// Best-effort extraction of the `message` field from an upstream error body.
pub fn upstream_error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_string())
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
