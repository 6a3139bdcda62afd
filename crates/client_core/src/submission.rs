//! Report submission view: an owned state value replaced on every
//! transition, and a driver that runs one gateway round trip per submit.

use std::mem;

use shared::protocol::AssessmentResult;
use tracing::{debug, warn};

use crate::{render, GatewayClient};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Assessed(AssessmentResult),
    Failed(String),
}

/// Sequence number handed out when a submission is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    description: String,
    phase: SubmissionPhase,
    outcome: Option<SubmissionOutcome>,
    latest_ticket: u64,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        match &self.outcome {
            Some(SubmissionOutcome::Assessed(result)) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(SubmissionOutcome::Failed(message)) => Some(message),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// The only input gate on the client side.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.description.trim().is_empty()
    }

    /// A finished submission drops back to `Idle`; its outcome stays on
    /// screen until the next submit.
    #[must_use]
    pub fn edit(self, description: impl Into<String>) -> Self {
        let phase = match self.phase {
            SubmissionPhase::Submitting => SubmissionPhase::Submitting,
            _ => SubmissionPhase::Idle,
        };
        Self {
            description: description.into(),
            phase,
            ..self
        }
    }

    /// Enters `Submitting` and clears the previous outcome. Hands the
    /// unchanged state back when the guard rejects the submit.
    pub fn begin_submit(self) -> Result<(Self, Ticket), Self> {
        if !self.can_submit() {
            return Err(self);
        }
        let ticket = Ticket(self.latest_ticket + 1);
        Ok((
            Self {
                phase: SubmissionPhase::Submitting,
                outcome: None,
                latest_ticket: ticket.0,
                ..self
            },
            ticket,
        ))
    }

    /// Applies a gateway response. Responses for anything but the most
    /// recently issued ticket are dropped.
    #[must_use]
    pub fn resolve(self, ticket: Ticket, outcome: Result<AssessmentResult, String>) -> Self {
        if !self.is_submitting() || ticket.0 != self.latest_ticket {
            debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "dropping stale assessment response"
            );
            return self;
        }

        match outcome {
            Ok(result) => Self {
                phase: SubmissionPhase::Success,
                outcome: Some(SubmissionOutcome::Assessed(result)),
                ..self
            },
            Err(message) => Self {
                phase: SubmissionPhase::Failed,
                outcome: Some(SubmissionOutcome::Failed(message)),
                ..self
            },
        }
    }
}

pub struct SubmissionView<G> {
    gateway: G,
    state: SubmissionState,
}

impl<G: GatewayClient> SubmissionView<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: SubmissionState::new(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn edit(&mut self, description: impl Into<String>) {
        self.state = mem::take(&mut self.state).edit(description);
    }

    /// Runs one submission. Returns `false` without calling the gateway when
    /// the submit guard rejects it.
    pub async fn submit(&mut self) -> bool {
        let (state, ticket) = match mem::take(&mut self.state).begin_submit() {
            Ok(issued) => issued,
            Err(state) => {
                self.state = state;
                return false;
            }
        };
        let description = state.description().to_string();
        self.state = state;

        let outcome = self
            .gateway
            .submit_assessment(&description)
            .await
            .map_err(|err| {
                warn!(error = %err, "assessment submission failed");
                err.to_string()
            });
        self.state = mem::take(&mut self.state).resolve(ticket, outcome);
        true
    }

    pub fn render(&self) -> String {
        render::submission_page(&self.state)
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
