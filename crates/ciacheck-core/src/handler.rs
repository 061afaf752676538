//! The analysis request handler.
//!
//! One invocation is a stateless request/render cycle ending in exactly one
//! of: input rejected, report (or server error) rendered, connectivity
//! failure. Invocations share only the output region; overlapping cycles are
//! neither cancelled nor ordered, so whichever finishes last owns the region.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{InputError, CONNECTIVITY_MESSAGE};
use crate::gateway::AnalysisGateway;
use crate::model::{AnalysisRequest, AnalysisResponse, Selection};
use crate::surface::ResultsSurface;
use crate::validate::validate_url;
use crate::view::ResultsView;

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Empty or malformed URL; no request was sent.
    InputRejected(InputError),
    /// The backend answered with an `error` field, shown verbatim.
    ServerError(String),
    /// A report was rendered.
    Rendered,
    /// Transport, decoding or rendering failed; the generic message is shown.
    ConnectivityFailed,
}

#[derive(Clone)]
pub struct AnalysisHandler {
    gateway: Arc<dyn AnalysisGateway>,
    surface: Arc<dyn ResultsSurface>,
}

impl AnalysisHandler {
    pub fn new(gateway: Arc<dyn AnalysisGateway>, surface: Arc<dyn ResultsSurface>) -> Self {
        Self { gateway, surface }
    }

    /// Run one cycle to completion.
    pub async fn run(&self, selection: Selection, raw_url: &str) -> Outcome {
        match self.prepare(selection, raw_url) {
            Ok(request) => self.complete(selection, request).await,
            Err(outcome) => outcome,
        }
    }

    /// Validate synchronously, then hand the network round trip to the
    /// runtime and return immediately.
    ///
    /// Returns `None` when validation stopped the cycle (the region already
    /// shows the input error). Must be called within a tokio runtime.
    pub fn dispatch(&self, selection: Selection, raw_url: &str) -> Option<JoinHandle<Outcome>> {
        let request = self.prepare(selection, raw_url).ok()?;
        let handler = self.clone();
        Some(tokio::spawn(async move { handler.complete(selection, request).await }))
    }

    fn prepare(&self, selection: Selection, raw_url: &str) -> Result<AnalysisRequest, Outcome> {
        self.surface.reveal();

        match validate_url(raw_url) {
            Ok(url) => Ok(AnalysisRequest::new(url, selection)),
            Err(e) => {
                debug!(selection = %selection, reason = %e, "Rejected analysis input");
                self.show_message(&e.user_message());
                Err(Outcome::InputRejected(e))
            }
        }
    }

    async fn complete(&self, selection: Selection, request: AnalysisRequest) -> Outcome {
        let span = info_span!(
            "analysis",
            request_id = %Uuid::new_v4(),
            selection = %selection,
            test_type = %request.test_type,
        );

        async move {
            let response = match self.gateway.analyze(&request).await {
                Ok(response) => response,
                Err(e) => {
                    error!(error = %e, url = %request.url, "Analysis request failed");
                    self.show_message(CONNECTIVITY_MESSAGE);
                    return Outcome::ConnectivityFailed;
                }
            };

            let server_error = match &response {
                AnalysisResponse::Failed { error } => {
                    warn!(error = %error, "Backend reported an error");
                    Some(error.clone())
                }
                _ => None,
            };

            let view = match ResultsView::from_response(selection, response) {
                Ok(view) => view,
                Err(e) => {
                    error!(error = %e, "Analysis response did not match the request");
                    self.show_message(CONNECTIVITY_MESSAGE);
                    return Outcome::ConnectivityFailed;
                }
            };

            if let Err(e) = self.surface.replace(&view) {
                error!(error = %e, "Failed to render analysis results");
                self.show_message(CONNECTIVITY_MESSAGE);
                return Outcome::ConnectivityFailed;
            }

            match server_error {
                Some(error) => Outcome::ServerError(error),
                None => {
                    info!(sections = view.section_count(), "Rendered analysis results");
                    Outcome::Rendered
                }
            }
        }
        .instrument(span)
        .await
    }

    fn show_message(&self, text: &str) {
        if let Err(e) = self.surface.replace(&ResultsView::message(text)) {
            error!(error = %e, "Failed to render message");
        }
    }
}
