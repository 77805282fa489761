//! Paged view: layout constants plus frame-gated re-pagination

use crate::document::Document;
use crate::layout::font::Typography;
use crate::layout::measure::{Measure, TextMeasurer};
use crate::layout::pagination::{paginate, Pagination};
use crate::render::{render_pages, RenderedPage};
use log::debug;

/// Page geometry in pixels at 96 DPI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstraints {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl LayoutConstraints {
    /// US Letter (8.5" x 11") with 1" margins
    pub const LETTER: LayoutConstraints = LayoutConstraints::uniform(816.0, 1056.0, 96.0);

    /// Same margin on all four sides
    pub const fn uniform(page_width: f32, page_height: f32, margin: f32) -> Self {
        Self {
            page_width,
            page_height,
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
        }
    }

    /// Get usable content width
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Get usable content height per page
    pub fn content_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }
}

impl Default for LayoutConstraints {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Paginated view over the editor content
///
/// Content changes are recorded, not laid out: [`PagedView::on_frame`] runs
/// at most one pass per frame over the latest snapshot, so bursts of edits
/// cost a single pagination.
pub struct PagedView<M = TextMeasurer> {
    constraints: LayoutConstraints,
    measurer: M,
    /// Latest content waiting for the next frame
    pending: Option<String>,
    pagination: Pagination,
    /// Completed pagination passes
    passes: u64,
}

impl PagedView<TextMeasurer> {
    /// Letter pages with the default body typography
    pub fn new() -> Self {
        let constraints = LayoutConstraints::LETTER;
        Self::with_measurer(
            constraints,
            TextMeasurer::new(&constraints, Typography::DEFAULT),
        )
    }
}

impl Default for PagedView<TextMeasurer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Measure> PagedView<M> {
    pub fn with_measurer(constraints: LayoutConstraints, measurer: M) -> Self {
        Self {
            constraints,
            measurer,
            pending: None,
            pagination: Pagination::default(),
            passes: 0,
        }
    }

    /// Get constraints
    pub fn constraints(&self) -> &LayoutConstraints {
        &self.constraints
    }

    /// Record new content; replaces any request still waiting for a frame
    pub fn content_changed(&mut self, html: impl Into<String>) {
        if self.pending.replace(html.into()).is_some() {
            debug!("superseded pending pagination request");
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Frame boundary: paginate the latest content if any arrived
    pub fn on_frame(&mut self) -> bool {
        match self.pending.take() {
            Some(html) => {
                self.run_pass(&html);
                true
            }
            None => false,
        }
    }

    /// Paginate immediately, dropping any pending request
    pub fn paginate_now(&mut self, html: &str) -> &Pagination {
        self.pending = None;
        self.run_pass(html);
        &self.pagination
    }

    fn run_pass(&mut self, html: &str) {
        let document = Document::from_html(html);
        self.pagination = paginate(
            document.blocks(),
            self.constraints.content_height(),
            &mut self.measurer,
        );
        self.passes += 1;
        debug!(
            "pagination pass {}: {} pages",
            self.passes,
            self.pagination.page_count()
        );
    }

    /// Current page list
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Get page count
    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Render the current pages for display
    pub fn render(&self) -> Vec<RenderedPage> {
        render_pages(&self.pagination, &self.constraints)
    }
}
