//! Analyzer page route handlers.
//!
//! Each button posts the form to `/run/{category}`; the response is the same
//! page with the results region replaced by that cycle's markup.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use ciacheck_core::{AnalysisHandler, Category, HtmlRegion, Selection};
use serde::Deserialize;
use tracing::debug;

use crate::state::AppState;

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "index.html")]
struct PageTemplate<'a> {
    url: &'a str,
    buttons: Vec<ButtonView>,
    results_visible: bool,
    results: &'a str,
}

/// View model for one trigger button.
struct ButtonView {
    token: &'static str,
    label: String,
}

fn buttons() -> Vec<ButtonView> {
    let mut buttons: Vec<ButtonView> = Category::ALL
        .into_iter()
        .map(|c| ButtonView {
            token: c.key(),
            label: format!("{} {}", c.icon(), c.title()),
        })
        .collect();
    buttons.push(ButtonView {
        token: Selection::All.token(),
        label: "Full CIA Check".to_string(),
    });
    buttons
}

fn render_page(url: &str, region: Option<&HtmlRegion>) -> Response {
    let results = region.map(HtmlRegion::markup).unwrap_or_default();
    let template = PageTemplate {
        url,
        buttons: buttons(),
        results_visible: region.is_some_and(HtmlRegion::is_visible),
        results: &results,
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Template error: {}", e))).into_response(),
    }
}

// ============================================================
// REQUEST TYPES
// ============================================================

#[derive(Deserialize)]
pub struct RunForm {
    #[serde(default)]
    pub url: String,
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - Render the empty analyzer page.
pub async fn index() -> Response {
    render_page("", None)
}

/// POST /run/{category} - Run one analysis cycle and render the page with its results.
pub async fn run(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Form(form): Form<RunForm>,
) -> Response {
    let selection: Selection = match category.parse() {
        Ok(s) => s,
        Err(e) => return (StatusCode::BAD_REQUEST, Html(format!("Error: {}", e))).into_response(),
    };

    // Every page load is its own output region.
    let region = HtmlRegion::new();
    let handler = AnalysisHandler::new(state.gateway.clone(), Arc::new(region.clone()));
    let outcome = handler.run(selection, &form.url).await;
    debug!(?outcome, selection = %selection, "Analysis cycle finished");

    render_page(form.url.trim(), Some(&region))
}
