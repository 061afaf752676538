//! What the output region shows after one analysis cycle.

use crate::error::GatewayError;
use crate::model::{AnalysisResponse, Category, CategoryOutcome, CategoryScore, Selection};

/// Content of the output region. Every cycle replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    /// Input, server-reported or connectivity error.
    Message(String),
    Report {
        summary: Option<String>,
        sections: Vec<SectionView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub category: Category,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Scored(CategoryScore),
    Failed(String),
}

impl ResultsView {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    /// Build the view for a decoded response.
    ///
    /// A flat single-category body answering an "all" request has no
    /// category to render under and is rejected as a decode error.
    pub fn from_response(
        selection: Selection,
        response: AnalysisResponse,
    ) -> Result<Self, GatewayError> {
        match response {
            AnalysisResponse::Failed { error } => Ok(Self::Message(error)),
            AnalysisResponse::Full(report) => {
                let sections = report
                    .entries()
                    .map(|(category, outcome)| SectionView {
                        category,
                        body: match outcome {
                            CategoryOutcome::Scored(score) => SectionBody::Scored(score.clone()),
                            CategoryOutcome::Failed(error) => SectionBody::Failed(error.clone()),
                        },
                    })
                    .collect();
                Ok(Self::Report {
                    summary: report.overall_summary,
                    sections,
                })
            }
            AnalysisResponse::Single(score) => {
                let category = selection.category().ok_or_else(|| {
                    GatewayError::decode("single-category response to an \"all\" request")
                })?;
                Ok(Self::Report {
                    summary: None,
                    sections: vec![SectionView {
                        category,
                        body: SectionBody::Scored(score),
                    }],
                })
            }
        }
    }

    /// Number of category sections shown.
    pub fn section_count(&self) -> usize {
        match self {
            Self::Message(_) => 0,
            Self::Report { sections, .. } => sections.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FullReport;

    fn score(n: u32) -> CategoryScore {
        CategoryScore {
            score: n,
            one_line: "ok".to_string(),
            explanation: "e".to_string(),
            suggestion: "s".to_string(),
        }
    }

    #[test]
    fn test_single_uses_requested_category() {
        let view = ResultsView::from_response(
            Selection::Single(Category::Integrity),
            AnalysisResponse::Single(score(55)),
        )
        .unwrap();
        let ResultsView::Report { sections, summary } = view else {
            panic!("expected report");
        };
        assert!(summary.is_none());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category, Category::Integrity);
    }

    #[test]
    fn test_single_for_all_is_rejected() {
        let err = ResultsView::from_response(Selection::All, AnalysisResponse::Single(score(1)));
        assert!(matches!(err, Err(GatewayError::Decode(_))));
    }

    #[test]
    fn test_full_report_keeps_display_order() {
        let report = FullReport {
            overall_score: None,
            overall_summary: None,
            confidentiality: CategoryOutcome::Scored(score(80)),
            integrity: CategoryOutcome::Failed("Request failed".to_string()),
            availability: CategoryOutcome::Scored(score(40)),
        };
        // details for a single request are still rendered in full
        let view = ResultsView::from_response(
            Selection::Single(Category::Availability),
            AnalysisResponse::Full(report),
        )
        .unwrap();
        let ResultsView::Report { sections, .. } = view else {
            panic!("expected report");
        };
        let order: Vec<Category> = sections.iter().map(|s| s.category).collect();
        assert_eq!(order, Category::ALL.to_vec());
        assert_eq!(sections[1].body, SectionBody::Failed("Request failed".to_string()));
    }

    #[test]
    fn test_server_error_is_verbatim_message() {
        let view = ResultsView::from_response(
            Selection::All,
            AnalysisResponse::Failed { error: "Unknown test type".to_string() },
        )
        .unwrap();
        assert_eq!(view, ResultsView::message("Unknown test type"));
        assert_eq!(view.section_count(), 0);
    }
}
