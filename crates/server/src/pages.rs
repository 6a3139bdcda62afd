//! The two HTML pages, plus the in-process adapter they use to reach the
//! gateway.

use std::{convert::Infallible, sync::Arc};

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{body::Body, extract::State, response::Html, Form};
use client_core::{
    render, GatewayClient, ReportListView, SubmissionView, FETCH_FAILURE_MESSAGE,
    SUBMIT_FAILURE_MESSAGE,
};
use futures::{future, stream, StreamExt};
use gateway::GatewayContext;
use serde::Deserialize;
use shared::{
    domain::CatReport,
    protocol::{AssessmentRequest, AssessmentResult, ReportList},
};
use tracing::warn;

use crate::app_state::AppState;

/// Calls the gateway functions directly, surfacing the same messages a
/// client of the JSON surface would see.
pub(crate) struct LocalGateway {
    ctx: GatewayContext,
}

impl LocalGateway {
    pub(crate) fn new(ctx: GatewayContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl GatewayClient for LocalGateway {
    async fn submit_assessment(&self, cat_description: &str) -> anyhow::Result<AssessmentResult> {
        let request = AssessmentRequest::new(cat_description).map_err(|e| anyhow!(e.message))?;
        let value = gateway::forward_assessment(&self.ctx, &request)
            .await
            .map_err(|e| anyhow!(e.message))?;
        serde_json::from_value(value).map_err(|error| {
            warn!(%error, "assessment body does not match the expected shape");
            anyhow!(SUBMIT_FAILURE_MESSAGE)
        })
    }

    async fn fetch_reports(&self) -> anyhow::Result<Vec<CatReport>> {
        let value = gateway::list_reports(&self.ctx)
            .await
            .map_err(|e| anyhow!(e.message))?;
        let list: ReportList = serde_json::from_value(value).map_err(|error| {
            warn!(%error, "report list body does not match the expected shape");
            anyhow!(FETCH_FAILURE_MESSAGE)
        })?;
        Ok(list.reports)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitForm {
    #[serde(rename = "catDescription", default)]
    cat_description: String,
}

pub(crate) async fn submission_form() -> Html<String> {
    Html(render::submission_page(&Default::default()))
}

pub(crate) async fn submit_report(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SubmitForm>,
) -> Html<String> {
    let mut view = SubmissionView::new(state.views.clone());
    view.edit(form.cat_description);
    view.submit().await;
    Html(view.render())
}

/// Streams the list page: the loading indicator goes out before the store
/// is queried, the settled list follows in the same response.
pub(crate) async fn report_list(State(state): State<Arc<AppState>>) -> Html<Body> {
    let mut view = ReportListView::new(state.views.clone());
    let settled = stream::once(async move {
        view.load().await;
        Ok::<_, Infallible>(render::report_list_tail(view.state()))
    });
    let chunks = stream::once(future::ready(Ok(render::report_list_head()))).chain(settled);
    Html(Body::from_stream(chunks))
}
