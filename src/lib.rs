//! OpenWriter: paged preview core for the document editor
//!
//! This crate splits the editor's HTML into fixed-size pages:
//! - Document adapter that turns markup into classified top-level blocks
//! - Native block measurement (font metrics + UAX #14 line breaking)
//! - Greedy paginator with hard and soft page breaks
//! - Frame-gated re-pagination and "Page N of M" page rendering

pub mod assistant;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod layout;
pub mod render;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPagedView;

// Re-export primary types
pub use assistant::{AssistAction, AssistError, AssistRequest, AssistantService};
pub use config::{AssistantSettings, Settings, SettingsStore};
pub use document::{Block, BlockKind, BreakClass, Document};
pub use error::{Error, Result};
pub use export::{slice_capture, CaptureSlice};
pub use layout::{
    paginate, LayoutConstraints, Measure, Page, PagedView, Pagination, Paginator, PlacedBlock,
    TextMeasurer, Typography,
};
pub use render::{footer_text, RenderedPage};

use serde::Serialize;

/// Page rectangle in layout pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Paginate a markup string with the default page geometry and typography
pub fn paginate_html(html: &str) -> Pagination {
    let mut view = PagedView::new();
    view.paginate_now(html).clone()
}

/// Pages whose bounds intersect a viewport of the preview strip
pub fn visible_pages(pages: &[RenderedPage], viewport: Rect) -> impl Iterator<Item = &RenderedPage> {
    pages.iter().filter(move |page| page.bounds.intersects(&viewport))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_html_empty() {
        let pagination = paginate_html("");
        assert_eq!(pagination.page_count(), 1);
        assert_eq!(pagination.block_count(), 0);
    }

    #[test]
    fn test_rect_intersects() {
        let page = Rect::new(0.0, 1056.0, 816.0, 1056.0);
        assert!(page.intersects(&Rect::new(0.0, 1500.0, 816.0, 100.0)));
        assert!(!page.intersects(&Rect::new(0.0, 0.0, 816.0, 1056.0)));
        assert_eq!(page.bottom(), 2112.0);
    }

    #[test]
    fn test_visible_pages() {
        let mut view = PagedView::with_measurer(LayoutConstraints::LETTER, |_: &str| 900.0);
        view.paginate_now("<p>a</p><p>b</p><p>c</p>");
        let pages = view.render();
        let visible: Vec<usize> = visible_pages(&pages, Rect::new(0.0, 1100.0, 816.0, 1200.0))
            .map(|p| p.number)
            .collect();
        assert_eq!(visible, vec![2, 3]);
    }
}
