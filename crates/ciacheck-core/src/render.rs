//! HTML rendering of the output region.
//!
//! Backend text is interpolated through askama's HTML escaper.

use askama::Template;

use crate::error::CiaResult;
use crate::view::{ResultsView, SectionBody, SectionView};

#[derive(Template)]
#[template(source = "<p class=\"error-message\">{{ message }}</p>", ext = "html")]
struct MessageTemplate<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    summary: Option<&'a str>,
    sections: Vec<SectionRow<'a>>,
}

/// Template row for one category section.
struct SectionRow<'a> {
    icon: &'static str,
    title: &'static str,
    body: RowBody<'a>,
}

enum RowBody<'a> {
    Scored(ScoreRow<'a>),
    Failed(&'a str),
}

struct ScoreRow<'a> {
    score: u32,
    percent: u32,
    one_line: &'a str,
    explanation: &'a str,
    suggestion: &'a str,
}

impl<'a> SectionRow<'a> {
    fn from_section(section: &'a SectionView) -> Self {
        let body = match &section.body {
            SectionBody::Scored(score) => RowBody::Scored(ScoreRow {
                score: score.score,
                percent: score.percent(),
                one_line: &score.one_line,
                explanation: &score.explanation,
                suggestion: &score.suggestion,
            }),
            SectionBody::Failed(message) => RowBody::Failed(message),
        };
        Self {
            icon: section.category.icon(),
            title: section.category.title(),
            body,
        }
    }
}

/// Render a view into the markup that replaces the output region.
pub fn render_html(view: &ResultsView) -> CiaResult<String> {
    let html = match view {
        ResultsView::Message(message) => MessageTemplate { message }.render()?,
        ResultsView::Report { summary, sections } => ReportTemplate {
            summary: summary.as_deref(),
            sections: sections.iter().map(SectionRow::from_section).collect(),
        }
        .render()?,
    };
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, CategoryScore};

    fn scored(category: Category, score: u32) -> SectionView {
        SectionView {
            category,
            body: SectionBody::Scored(CategoryScore {
                score,
                one_line: format!("{} line", category),
                explanation: "explained".to_string(),
                suggestion: "suggested".to_string(),
            }),
        }
    }

    #[test]
    fn test_message_markup_is_exact() {
        let html = render_html(&ResultsView::message("Could not reach host")).unwrap();
        assert_eq!(html, r#"<p class="error-message">Could not reach host</p>"#);
    }

    #[test]
    fn test_message_is_escaped() {
        let html = render_html(&ResultsView::message("<script>alert(1)</script>")).unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_single_section() {
        let view = ResultsView::Report {
            summary: None,
            sections: vec![scored(Category::Integrity, 55)],
        };
        let html = render_html(&view).unwrap();
        assert_eq!(html.matches(r#"<div class="cia-section">"#).count(), 1);
        assert!(html.contains("<h4>🛡 Integrity</h4>"));
        assert!(html.contains(r#"<div class="score">55 / 100</div>"#));
        assert!(html.contains(r#"style="width:55%;""#));
        assert!(html.contains("<p><strong>One-line:</strong> integrity line</p>"));
        assert!(html.contains("<p><strong>Explanation:</strong> explained</p>"));
        assert!(html.contains("<p><strong>Suggestion:</strong> suggested</p>"));
        assert!(!html.contains("cia-overall"));
    }

    #[test]
    fn test_full_report_order_and_widths() {
        let view = ResultsView::Report {
            summary: Some("Overall 60/100".to_string()),
            sections: vec![
                scored(Category::Confidentiality, 80),
                scored(Category::Integrity, 60),
                scored(Category::Availability, 40),
            ],
        };
        let html = render_html(&view).unwrap();
        assert_eq!(html.matches(r#"<div class="cia-section">"#).count(), 3);

        let c = html.find("🔒 Confidentiality").unwrap();
        let i = html.find("🛡 Integrity").unwrap();
        let a = html.find("⚡ Availability").unwrap();
        assert!(c < i && i < a);

        let w80 = html.find("width:80%;").unwrap();
        let w60 = html.find("width:60%;").unwrap();
        let w40 = html.find("width:40%;").unwrap();
        assert!(c < w80 && w80 < i && i < w60 && w60 < a && a < w40);
        assert!(html.find("cia-overall").unwrap() < c);
    }

    #[test]
    fn test_progress_width_is_clamped() {
        let view = ResultsView::Report {
            summary: None,
            sections: vec![scored(Category::Availability, 150)],
        };
        let html = render_html(&view).unwrap();
        assert!(html.contains("150 / 100"));
        assert!(html.contains("width:100%;"));
    }

    #[test]
    fn test_failed_section() {
        let view = ResultsView::Report {
            summary: None,
            sections: vec![SectionView {
                category: Category::Confidentiality,
                body: SectionBody::Failed("Request failed: timed out".to_string()),
            }],
        };
        let html = render_html(&view).unwrap();
        assert!(html.contains("🔒 Confidentiality"));
        assert!(html.contains(r#"<p class="error-message">Request failed: timed out</p>"#));
        assert!(!html.contains("progress-bar"));
    }
}
