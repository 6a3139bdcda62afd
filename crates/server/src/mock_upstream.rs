//! Stand-ins for the external assessment service and report store, so the
//! server can run end to end with nothing else deployed.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use shared::{
    domain::{CatReport, ReportId},
    protocol::{AssessmentRequest, ReportList},
};
use tracing::info;

use crate::app_state::AppState;

pub(crate) fn mock_assessment_route() -> &'static str {
    "/mock/assessment"
}

pub(crate) fn mock_reports_route() -> &'static str {
    "/mock/reports"
}

pub(crate) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(mock_assessment_route(), post(mock_assessment))
        .route(mock_reports_route(), get(mock_reports))
}

async fn mock_assessment(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    info!("mock assessment service hit");
    let request = AssessmentRequest::from_json(&body).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "catDescription must be a non-empty string" })),
        )
    })?;

    tokio::time::sleep(state.mock_delay).await;

    Ok(Json(json!({
        "assessment": format!(
            "This is a mock assessment for a cat described as \"{}\". The real assessment will come from the triage service.",
            request.cat_description
        ),
        "immediateCareSteps": [
            "Mock step 1: Provide water and a small amount of food if safe.",
            "Mock step 2: Do not try to pick up if fearful.",
            "Mock step 3: Observe from a distance for 24-48 hours if seemingly healthy.",
        ],
        "resourceCategories": "mock shelter, mock vet, mock animal control",
        "keywords": "mock, test, stray cat",
    })))
}

async fn mock_reports(State(state): State<Arc<AppState>>) -> Json<ReportList> {
    info!("mock report store hit");
    tokio::time::sleep(state.mock_delay).await;

    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    Json(ReportList {
        reports: vec![
            CatReport {
                report_id: ReportId("mock-1".into()),
                timestamp: now.clone(),
                cat_description: "Mock cat 1: Friendly, fluffy, sitting on porch.".into(),
                assessment: "Mock Assessment: Appears to be a lost housecat.".into(),
                immediate_care_steps: vec![
                    "Mock step 1: Offer food.".into(),
                    "Mock step 2: Check for collar.".into(),
                ],
                resource_categories: "shelter, lost pet registries".into(),
                keywords: "friendly, fluffy, lost".into(),
            },
            CatReport {
                report_id: ReportId("mock-2".into()),
                timestamp: now,
                cat_description: "Mock cat 2: Small, limping, hiding under car.".into(),
                assessment: "Mock Assessment: Possibly injured stray.".into(),
                immediate_care_steps: vec![
                    "Mock step 1: Do not approach.".into(),
                    "Mock step 2: Call animal control.".into(),
                ],
                resource_categories: "veterinary clinic, animal control".into(),
                keywords: "injured, shy, stray".into(),
            },
        ],
    })
}
