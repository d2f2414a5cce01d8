//! Report Renderer — turns a `Report` into a shareable document on disk.
//!
//! `HtmlReportRenderer` produces a single self-contained HTML page. Only the
//! `Report` is consulted; the renderer never reaches back into the pipeline.

use std::fmt::Write as _;
use std::path::Path;

use async_trait::async_trait;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::errors::AppError;
use crate::models::Report;

#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Writes the rendered document to `output`.
    async fn render(&self, report: &Report, output: &Path) -> Result<(), AppError>;
}

pub struct HtmlReportRenderer;

#[async_trait]
impl ReportRenderer for HtmlReportRenderer {
    async fn render(&self, report: &Report, output: &Path) -> Result<(), AppError> {
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::ReportGeneration(format!("{}: {e}", parent.display())))?;
        }
        tokio::fs::write(output, render_html(report))
            .await
            .map_err(|e| AppError::ReportGeneration(format!("{}: {e}", output.display())))
    }
}

const STYLE: &str = "\
body { font-family: Helvetica, Arial, sans-serif; color: #374151; max-width: 800px; margin: 48px auto; line-height: 1.4; }
h1 { color: #1e1b4b; text-align: center; font-size: 24pt; margin-bottom: 4px; }
h2 { color: #4f46e5; font-size: 16pt; margin-top: 28px; }
.date { text-align: center; }
.score { text-align: center; font-size: 30pt; font-weight: bold; margin: 24px 0; }
table.info td { padding: 8px; }
table.info td:first-child { background: #f3f4f6; width: 180px; }
.missing { color: #dc2626; }
.course { font-size: 9pt; margin-left: 16px; }
.none { font-size: 9pt; margin-left: 16px; color: #6b7280; }";

/// Pure HTML rendering, separated from I/O for testing.
pub fn render_html(report: &Report) -> String {
    let matched = &report.match_details.matched_skills;
    let missing = &report.match_details.missing_skills;
    let mut html = String::new();

    // `write!` into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>ATS Analysis Report</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <h1>ATS Analysis Report</h1>\n\
         <p class=\"date\">Generated on {}</p>\n\
         <p class=\"score\">Overall Match Score: <span style=\"color: {}\">{}%</span></p>\n",
        report.generated_at.format("%B %d, %Y"),
        report.score_band().color(),
        report.match_score,
    );

    let _ = write!(
        html,
        "<table class=\"info\">\n\
         <tr><td>Education:</td><td>{}</td></tr>\n\
         <tr><td>JD Role:</td><td>{}</td></tr>\n\
         <tr><td>Location:</td><td>{}</td></tr>\n\
         </table>\n",
        encode_text(or_na(&report.resume_data.education)),
        encode_text(or_na(&report.jd_data.role)),
        encode_text(or_na(&report.resume_data.location)),
    );

    let _ = write!(
        html,
        "<h2>Skills Analysis</h2>\n\
         <p><b>Matched ({}):</b> {}</p>\n\
         <p><b>Missing ({}):</b> <span class=\"missing\">{}</span></p>\n",
        matched.len(),
        encode_text(&matched.join(", ")),
        missing.len(),
        encode_text(&missing.join(", ")),
    );

    let _ = write!(
        html,
        "<h2>Executive Summary</h2>\n<p>{}</p>\n",
        encode_text(&report.summary)
    );

    if !report.course_recommendations.is_empty() {
        html.push_str("<h2>Recommended Learning Path</h2>\n");
        for (skill, courses) in &report.course_recommendations {
            let _ = writeln!(html, "<p><b>{}</b></p>", encode_text(skill));
            if courses.is_empty() {
                html.push_str("<p class=\"none\">No recommendations found</p>\n");
            }
            for course in courses {
                let _ = writeln!(
                    html,
                    "<p class=\"course\">&bull; <a href=\"{}\">{}</a></p>",
                    encode_double_quoted_attribute(&course.link),
                    encode_text(&course.title),
                );
            }
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}
