//! Output region port.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::CiaResult;
use crate::render::render_html;
use crate::view::ResultsView;

/// The single rendering target shared by every analysis cycle.
///
/// `replace` swaps the whole content; surfaces never append.
pub trait ResultsSurface: Send + Sync {
    /// Make the region visible.
    fn reveal(&self);

    /// Replace the region's content with `view`.
    fn replace(&self, view: &ResultsView) -> CiaResult<()>;
}

#[derive(Debug, Default)]
struct RegionState {
    visible: bool,
    markup: String,
}

/// In-memory HTML output region.
///
/// Clones share the same region, so concurrent cycles race on it and the
/// last `replace` wins.
#[derive(Debug, Clone, Default)]
pub struct HtmlRegion {
    inner: Arc<Mutex<RegionState>>,
}

impl HtmlRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    /// Snapshot of the current markup.
    pub fn markup(&self) -> String {
        self.lock().markup.clone()
    }

    fn lock(&self) -> MutexGuard<'_, RegionState> {
        // `markup` is only ever assigned whole, so a poisoned lock still
        // holds a complete render.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResultsSurface for HtmlRegion {
    fn reveal(&self) {
        self.lock().visible = true;
    }

    fn replace(&self, view: &ResultsView) -> CiaResult<()> {
        let markup = render_html(view)?;
        self.lock().markup = markup;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_starts_hidden_and_empty() {
        let region = HtmlRegion::new();
        assert!(!region.is_visible());
        assert_eq!(region.markup(), "");
        region.reveal();
        assert!(region.is_visible());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let region = HtmlRegion::new();
        region.replace(&ResultsView::message("first")).unwrap();
        region.replace(&ResultsView::message("second")).unwrap();
        assert_eq!(region.markup(), r#"<p class="error-message">second</p>"#);
    }

    #[test]
    fn test_clones_share_content() {
        let region = HtmlRegion::new();
        let other = region.clone();
        other.replace(&ResultsView::message("shared")).unwrap();
        assert!(region.markup().contains("shared"));
    }
}
