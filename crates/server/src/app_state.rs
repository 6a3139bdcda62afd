use std::{sync::Arc, time::Duration};

use client_core::GatewayClient;
use gateway::GatewayContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) gateway: GatewayContext,
    /// What the HTML pages call; either the in-process gateway or a remote one.
    pub(crate) views: Arc<dyn GatewayClient>,
    pub(crate) mock_delay: Duration,
}
