use std::mem;

use shared::domain::CatReport;
use tracing::warn;

use crate::{render, GatewayClient};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportListState {
    #[default]
    Loading,
    Loaded(Vec<CatReport>),
    Failed(String),
}

impl ReportListState {
    /// Only a `Loading` state accepts a result.
    #[must_use]
    pub fn resolve(self, outcome: Result<Vec<CatReport>, String>) -> Self {
        match (self, outcome) {
            (ReportListState::Loading, Ok(reports)) => ReportListState::Loaded(reports),
            (ReportListState::Loading, Err(message)) => ReportListState::Failed(message),
            (settled, _) => settled,
        }
    }

    pub fn reports(&self) -> &[CatReport] {
        match self {
            ReportListState::Loaded(reports) => reports,
            _ => &[],
        }
    }
}

pub struct ReportListView<G> {
    gateway: G,
    state: ReportListState,
    requested: bool,
}

impl<G: GatewayClient> ReportListView<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: ReportListState::Loading,
            requested: false,
        }
    }

    pub fn state(&self) -> &ReportListState {
        &self.state
    }

    /// Issues the single fetch for this view instance. Later calls are
    /// no-ops; there is no retry.
    pub async fn load(&mut self) {
        if self.requested {
            return;
        }
        self.requested = true;

        let outcome = self.gateway.fetch_reports().await.map_err(|err| {
            warn!(error = %err, "report list fetch failed");
            err.to_string()
        });
        self.state = mem::take(&mut self.state).resolve(outcome);
    }

    pub fn render(&self) -> String {
        render::report_list_page(&self.state)
    }
}

#[cfg(test)]
#[path = "tests/report_list_tests.rs"]
mod tests;
