//! HTML for the two pages. All user and upstream text goes through
//! [`escape`].

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use shared::{
    domain::CatReport,
    protocol::{report_list_page_route, submission_page_route, AssessmentResult},
};

use crate::{report_list::ReportListState, submission::SubmissionState};

const TITLE: &str = "Furry Friends Finder";
pub const SUBMITTING_LABEL: &str = "Generating Assessment...";
pub const SUBMIT_LABEL: &str = "Submit Report";
pub const LOADING_TEXT: &str = "Loading reports...";
pub const EMPTY_REPORTS_TEXT: &str = "No reports found yet. Submit one!";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// RFC 3339 timestamps are normalised to UTC; anything else is shown as sent.
pub fn display_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| {
            ts.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

const PAGE_END: &str = "</main>\n</body>\n</html>\n";
const REPORT_LIST_HEADING: &str = "All Reports";

fn page_start(heading: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{TITLE} - {heading}</title>\n</head>\n<body>\n<main>\n\
         <h1>{TITLE} - {heading}</h1>\n"
    )
}

fn page(heading: &str, body: &str) -> String {
    format!("{}{body}{PAGE_END}", page_start(heading))
}

fn error_block(out: &mut String, message: &str) {
    let _ = writeln!(
        out,
        "<div class=\"error\" role=\"alert\">Error: {}</div>",
        escape(message)
    );
}

fn step_list(out: &mut String, steps: &[String]) {
    out.push_str("<ul>\n");
    for step in steps {
        let _ = writeln!(out, "<li>{}</li>", escape(step));
    }
    out.push_str("</ul>\n");
}

pub fn submission_page(state: &SubmissionState) -> String {
    let mut body = String::new();
    let disabled = if state.can_submit() { "" } else { " disabled" };
    let label = if state.is_submitting() {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    };

    let _ = write!(
        body,
        "<form method=\"post\" action=\"{action}\" \
         onsubmit=\"var b=this.querySelector('button');b.disabled=true;b.textContent='{SUBMITTING_LABEL}';\">\n\
         <label for=\"catDescription\">Describe the Cat&#39;s Condition &amp; Behavior:</label>\n\
         <textarea id=\"catDescription\" name=\"catDescription\" rows=\"8\" \
         placeholder=\"e.g., &#39;Small, limping, meowing loudly&#39; or &#39;Friendly, but covered in fleas&#39;\" \
         oninput=\"document.getElementById('submit').disabled=!this.value.trim();\">\n{description}</textarea>\n\
         <button id=\"submit\" type=\"submit\"{disabled}>{label}</button>\n</form>\n",
        action = submission_page_route(),
        description = escape(state.description()),
    );

    if let Some(message) = state.error() {
        error_block(&mut body, message);
    }

    if let Some(result) = state.result().filter(|result| !result.is_empty()) {
        assessment_section(&mut body, result);
    }

    let _ = writeln!(
        body,
        "<nav><a href=\"{}\">View all reports &rarr;</a></nav>",
        report_list_page_route()
    );

    page("Report a Cat", &body)
}

fn assessment_section(out: &mut String, result: &AssessmentResult) {
    out.push_str("<section class=\"result\">\n");
    if !result.assessment.is_empty() {
        let _ = writeln!(
            out,
            "<h2>Assessment:</h2>\n<p class=\"assessment\">{}</p>",
            escape(&result.assessment)
        );
    }
    if !result.immediate_care_steps.is_empty() {
        out.push_str("<h2>Immediate Safe Care Steps:</h2>\n");
        step_list(out, &result.immediate_care_steps);
    }
    if !result.resource_categories.is_empty() {
        let _ = writeln!(
            out,
            "<h2>Suggested Resource Categories:</h2>\n<p>{}</p>",
            escape(&result.resource_categories)
        );
    }
    if !result.keywords.is_empty() {
        let _ = writeln!(
            out,
            "<h2>Keywords:</h2>\n<p>{}</p>",
            escape(&result.keywords)
        );
    }
    out.push_str("</section>\n");
}

pub fn report_list_page(state: &ReportListState) -> String {
    let mut body = String::new();
    report_list_nav(&mut body);
    report_list_state(&mut body, state);
    page(REPORT_LIST_HEADING, &body)
}

/// Opening chunk of a streamed report list: the page up to and including
/// the loading indicator.
pub fn report_list_head() -> String {
    let mut out = page_start(REPORT_LIST_HEADING);
    report_list_nav(&mut out);
    report_list_state(&mut out, &ReportListState::Loading);
    out
}

/// Closes a page opened with [`report_list_head`], hiding its loading
/// indicator once the list has settled.
pub fn report_list_tail(state: &ReportListState) -> String {
    let mut out = String::new();
    if !matches!(state, ReportListState::Loading) {
        out.push_str("<style>.loading{display:none}</style>\n");
        report_list_state(&mut out, state);
    }
    out.push_str(PAGE_END);
    out
}

fn report_list_nav(out: &mut String) {
    let _ = writeln!(
        out,
        "<nav><a href=\"{}\">&larr; Back to Report Cat</a></nav>",
        submission_page_route()
    );
}

fn report_list_state(out: &mut String, state: &ReportListState) {
    match state {
        ReportListState::Loading => {
            let _ = writeln!(out, "<p class=\"loading\">{LOADING_TEXT}</p>");
        }
        ReportListState::Failed(message) => error_block(out, message),
        ReportListState::Loaded(reports) if reports.is_empty() => {
            let _ = writeln!(out, "<p class=\"empty\">{EMPTY_REPORTS_TEXT}</p>");
        }
        ReportListState::Loaded(reports) => {
            out.push_str("<div class=\"reports\">\n");
            for report in reports {
                report_card(out, report);
            }
            out.push_str("</div>\n");
        }
    }
}

fn report_card(out: &mut String, report: &CatReport) {
    let _ = writeln!(
        out,
        "<article class=\"report\" data-report-id=\"{id}\">\n\
         <h2>Report ID: {id}</h2>\n\
         <p class=\"timestamp\"><time datetime=\"{raw_ts}\">Reported: {shown_ts}</time></p>\n\
         <h3>Description:</h3>\n<p>{description}</p>\n\
         <h3>Assessment:</h3>\n<p class=\"assessment\">{assessment}</p>",
        id = escape(&report.report_id.0),
        raw_ts = escape(&report.timestamp),
        shown_ts = escape(&display_timestamp(&report.timestamp)),
        description = escape(&report.cat_description),
        assessment = escape(&report.assessment),
    );
    if !report.immediate_care_steps.is_empty() {
        out.push_str("<h3>Immediate Care Steps:</h3>\n");
        step_list(out, &report.immediate_care_steps);
    }
    let _ = writeln!(
        out,
        "<h3>Resource Categories:</h3>\n<p>{}</p>\n\
         <h3>Keywords:</h3>\n<p>{}</p>\n</article>",
        escape(&report.resource_categories),
        escape(&report.keywords),
    );
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
