use super::*;
use crate::fakes::{injured_stray, report};

#[test]
fn escapes_markup_in_user_text() {
    assert_eq!(
        escape(r#"<script>alert("x") & 'y'</script>"#),
        "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
    );

    let state = SubmissionState::default().edit("<b>bold</b> cat");
    let html = submission_page(&state);
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; cat"));
    assert!(!html.contains("<b>bold</b>"));
}

#[test]
fn empty_form_renders_disabled_submit() {
    let html = submission_page(&SubmissionState::default());
    assert!(html.contains("<button id=\"submit\" type=\"submit\" disabled>Submit Report</button>"));
    assert!(!html.contains("class=\"result\""));
    assert!(html.contains(&format!("href=\"{}\"", report_list_page_route())));
}

#[test]
fn submitting_state_renders_progress_label() {
    let (state, _) = SubmissionState::default()
        .edit("tabby")
        .begin_submit()
        .expect("submit");
    let html = submission_page(&state);
    assert!(html.contains(&format!(" disabled>{SUBMITTING_LABEL}</button>")));
}

#[test]
fn result_sections_are_omitted_when_empty() {
    let (state, ticket) = SubmissionState::default()
        .edit("tabby")
        .begin_submit()
        .expect("submit");
    let state = state.resolve(
        ticket,
        Ok(AssessmentResult {
            assessment: "Healthy adult.".to_string(),
            ..AssessmentResult::default()
        }),
    );
    let html = submission_page(&state);
    assert!(html.contains("Healthy adult."));
    assert!(!html.contains("Immediate Safe Care Steps:"));
    assert!(!html.contains("Keywords:"));

    let (state, ticket) = SubmissionState::default()
        .edit("tabby")
        .begin_submit()
        .expect("submit");
    let state = state.resolve(ticket, Ok(injured_stray()));
    let html = submission_page(&state);
    assert!(html.contains("Immediate Safe Care Steps:"));
    assert!(html.contains("Suggested Resource Categories:"));
}

#[test]
fn empty_report_list_shows_explicit_message() {
    let html = report_list_page(&ReportListState::Loaded(Vec::new()));
    assert!(html.contains(EMPTY_REPORTS_TEXT));
    assert!(!html.contains("class=\"report\""));
}

#[test]
fn loading_state_shows_indicator() {
    let html = report_list_page(&ReportListState::Loading);
    assert!(html.contains(LOADING_TEXT));
    assert!(!html.contains(EMPTY_REPORTS_TEXT));
}

#[test]
fn reports_render_every_field_in_order() {
    let first = report("rep-A", "Friendly, fluffy, sitting on porch.", &["Offer food.", "Check for collar."]);
    let second = report("rep-B", "Small, limping, hiding under car.", &[]);
    let html = report_list_page(&ReportListState::Loaded(vec![first.clone(), second.clone()]));

    let pos_a = html.find("Report ID: rep-A").expect("first report");
    let pos_b = html.find("Report ID: rep-B").expect("second report");
    assert!(pos_a < pos_b);

    for report in [&first, &second] {
        assert!(html.contains(&report.cat_description));
        assert!(html.contains(&report.assessment));
        assert!(html.contains(&report.resource_categories));
        assert!(html.contains(&report.keywords));
        assert!(html.contains(&format!("datetime=\"{}\"", report.timestamp)));
    }
    assert!(html.contains("<li>Offer food.</li>"));
    assert!(html.contains("<li>Check for collar.</li>"));
    assert_eq!(html.matches("Immediate Care Steps:").count(), 1);
    assert!(html.contains("Reported: 2024-03-09 16:45:00 UTC"));
}

#[test]
fn unparseable_timestamp_is_shown_verbatim() {
    assert_eq!(display_timestamp("yesterday-ish"), "yesterday-ish");
    assert_eq!(
        display_timestamp("2024-03-09T18:45:00+02:00"),
        "2024-03-09 16:45:00 UTC"
    );
}

#[test]
fn leading_newline_in_description_survives_rerender() {
    let state = SubmissionState::default().edit("\nlimping near the bins");
    let html = submission_page(&state);
    assert!(html.contains(";\">\n\nlimping near the bins</textarea>"));
}

#[test]
fn streamed_list_opens_with_indicator_and_settles_in_tail() {
    let head = report_list_head();
    assert!(head.contains(LOADING_TEXT));
    assert!(head.contains(&format!("href=\"{}\"", submission_page_route())));
    assert!(!head.contains("</html>"));

    let settled = ReportListState::Loaded(vec![report("rep-A", "Grey tabby.", &[])]);
    let tail = report_list_tail(&settled);
    assert!(tail.contains("<style>.loading{display:none}</style>"));
    assert!(tail.contains("Report ID: rep-A"));
    assert!(!tail.contains(LOADING_TEXT));
    assert!(tail.ends_with("</html>\n"));

    let failed = report_list_tail(&ReportListState::Failed("Failed to fetch reports.".into()));
    assert!(failed.contains("Error: Failed to fetch reports."));

    let whole = format!("{head}{tail}");
    assert_eq!(whole.matches("<main>").count(), 1);
    assert_eq!(whole.matches("</main>").count(), 1);
}
