use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use client_core::{GatewayClient, HttpGatewayClient};
use gateway::GatewayContext;
use serde_json::Value;
use shared::{
    error::{ApiError, ApiException},
    protocol::{assess_route, report_list_page_route, reports_route, submission_page_route},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod mock_upstream;
mod pages;

use app_state::AppState;
use config::{load_settings, prepare_endpoint};
use pages::LocalGateway;

const MAX_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let assessment_url = prepare_endpoint(&settings.assessment_url)
        .context("assessment service url is not usable")?;
    let reports_url =
        prepare_endpoint(&settings.reports_url).context("report store url is not usable")?;

    let http = reqwest::Client::new();
    let gateway = GatewayContext::over_http(http.clone(), &assessment_url, &reports_url);
    let views: Arc<dyn GatewayClient> = match settings.gateway_url.as_deref() {
        Some(raw) => {
            let base = prepare_endpoint(raw).context("gateway url is not usable")?;
            info!(gateway_url = %base, "pages will reach the gateway over http");
            Arc::new(HttpGatewayClient::with_client(http, base))
        }
        None => Arc::new(LocalGateway::new(gateway.clone())),
    };

    let state = AppState {
        gateway,
        views,
        mock_delay: Duration::from_millis(settings.mock_delay_ms),
    };
    let app = build_router(Arc::new(state), settings.mock_upstreams);

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(
        %addr,
        %assessment_url,
        %reports_url,
        mock_upstreams = settings.mock_upstreams,
        "server listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, mock_upstreams: bool) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(healthz))
        .route(assess_route(), post(http_assess))
        .route(reports_route(), get(http_list_reports))
        .route(
            submission_page_route(),
            get(pages::submission_form).post(pages::submit_report),
        )
        .route(report_list_page_route(), get(pages::report_list));

    if mock_upstreams {
        router = router.merge(mock_upstream::routes());
    }

    router
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_assess(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    gateway::assess(&state.gateway, &body)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn http_list_reports(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    gateway::list_reports(&state.gateway)
        .await
        .map(Json)
        .map_err(error_response)
}

fn error_response(err: ApiException) -> (StatusCode, Json<ApiError>) {
    let status = StatusCode::from_u16(err.status).unwrap_or_else(|_| {
        error!(status = err.status, "upstream sent an unrepresentable status");
        StatusCode::INTERNAL_SERVER_ERROR
    });
    (status, Json(err.into()))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
