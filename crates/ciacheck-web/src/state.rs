//! Application state.

use std::sync::Arc;

use ciacheck_core::AnalysisGateway;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn AnalysisGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn AnalysisGateway>) -> Self {
        Self { gateway }
    }
}
