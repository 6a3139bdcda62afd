use super::*;
use crate::fakes::{injured_stray, FakeGateway};
use std::sync::Arc;

#[test]
fn blank_description_cannot_be_submitted() {
    let state = SubmissionState::new().edit("   \n");
    assert!(!state.can_submit());

    let state = state.begin_submit().expect_err("guard should reject");
    assert_eq!(state.phase(), SubmissionPhase::Idle);
}

#[test]
fn begin_submit_clears_previous_outcome_and_disables_submit() {
    let (state, ticket) = SubmissionState::new()
        .edit("tabby")
        .begin_submit()
        .expect("submit");
    let state = state.resolve(ticket, Err("boom".to_string()));
    assert_eq!(state.error(), Some("boom"));

    let (state, _) = state.begin_submit().expect("resubmit");
    assert_eq!(state.phase(), SubmissionPhase::Submitting);
    assert!(state.outcome().is_none());
    assert!(!state.can_submit());
}

#[test]
fn edit_after_success_returns_to_idle_and_keeps_result_visible() {
    let (state, ticket) = SubmissionState::new()
        .edit("tabby")
        .begin_submit()
        .expect("submit");
    let state = state.resolve(ticket, Ok(injured_stray()));
    assert_eq!(state.phase(), SubmissionPhase::Success);

    let state = state.edit("tabby, now hiding");
    assert_eq!(state.phase(), SubmissionPhase::Idle);
    assert_eq!(state.result(), Some(&injured_stray()));
    assert!(state.can_submit());
}

#[test]
fn editing_while_submitting_keeps_the_submission_in_flight() {
    let (state, ticket) = SubmissionState::new()
        .edit("tabby")
        .begin_submit()
        .expect("submit");
    let state = state.edit("tabby with a collar");
    assert_eq!(state.phase(), SubmissionPhase::Submitting);

    let state = state.resolve(ticket, Ok(injured_stray()));
    assert_eq!(state.phase(), SubmissionPhase::Success);
}

#[test]
fn stale_tickets_are_ignored() {
    let (state, first) = SubmissionState::new()
        .edit("first")
        .begin_submit()
        .expect("submit");
    let state = state.resolve(first, Err("first failed".to_string()));
    let (state, second) = state.edit("second").begin_submit().expect("submit");

    let state = state.resolve(first, Ok(injured_stray()));
    assert_eq!(state.phase(), SubmissionPhase::Submitting);
    assert!(state.outcome().is_none());

    let state = state.resolve(second, Err("second failed".to_string()));
    assert_eq!(state.error(), Some("second failed"));

    let state = state.resolve(second, Ok(injured_stray()));
    assert_eq!(state.error(), Some("second failed"));
}

#[tokio::test]
async fn view_renders_assessment_and_reenables_submit() {
    let gateway = Arc::new(FakeGateway::assessing(injured_stray()));
    let mut view = SubmissionView::new(gateway.clone());
    view.edit("Small, limping, hiding under car.");

    assert!(view.submit().await);

    assert_eq!(
        gateway.submissions(),
        vec!["Small, limping, hiding under car.".to_string()]
    );
    assert_eq!(view.state().phase(), SubmissionPhase::Success);
    assert_eq!(view.state().result(), Some(&injured_stray()));
    assert!(view.state().can_submit());

    let html = view.render();
    assert!(html.contains("Possibly injured stray."));
    assert!(html.contains("<li>Do not approach.</li>"));
    assert!(html.contains("<li>Call animal control.</li>"));
    assert!(html.contains("veterinary clinic, animal control"));
    assert!(html.contains("injured, shy, stray"));
    assert!(html.contains(">Submit Report</button>"));
    assert!(!html.contains(" disabled>"));
}

#[tokio::test]
async fn view_shows_gateway_error_message() {
    let gateway = FakeGateway::failing("overloaded");
    let mut view = SubmissionView::new(gateway);
    view.edit("tabby");

    assert!(view.submit().await);
    assert_eq!(view.state().phase(), SubmissionPhase::Failed);
    assert!(view.render().contains("Error: overloaded"));
}

#[tokio::test]
async fn view_skips_gateway_for_blank_description() {
    let gateway = Arc::new(FakeGateway::assessing(injured_stray()));
    let mut view = SubmissionView::new(gateway.clone());
    view.edit("  ");

    assert!(!view.submit().await);
    assert!(gateway.submissions().is_empty());
    assert_eq!(view.state().phase(), SubmissionPhase::Idle);
}
