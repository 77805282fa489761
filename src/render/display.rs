//! Display list: render-ready pages

use crate::layout::{LayoutConstraints, Pagination};
use crate::Rect;
use serde::Serialize;

/// A page ready for read-only display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    /// 1-based page number
    pub number: usize,
    /// Total pages in the document
    pub total: usize,
    /// Page position in the continuous preview strip
    pub bounds: Rect,
    /// Concatenated block markup
    pub markup: String,
    pub footer: String,
}

impl RenderedPage {
    /// Wrap the page body in a fixed-size container with its footer
    pub fn to_html(&self, constraints: &LayoutConstraints) -> String {
        format!(
            concat!(
                r#"<div class="page" data-page="{number}" style="position:relative;box-sizing:border-box;overflow:hidden;"#,
                r#"width:{width}px;height:{height}px;padding:{top}px {right}px {bottom}px {left}px">"#,
                r#"<div class="page-body">{markup}</div>"#,
                r#"<div class="page-footer" style="position:absolute;left:0;right:0;bottom:{footer_y}px;text-align:center">{footer}</div>"#,
                "</div>"
            ),
            number = self.number,
            width = self.bounds.width,
            height = self.bounds.height,
            top = constraints.margin_top,
            right = constraints.margin_right,
            bottom = constraints.margin_bottom,
            left = constraints.margin_left,
            markup = self.markup,
            footer_y = constraints.margin_bottom / 2.0,
            footer = self.footer,
        )
    }
}

/// Footer label for a page
pub fn footer_text(number: usize, total: usize) -> String {
    format!("Page {number} of {total}")
}

/// Build the display pages for a page list
pub fn render_pages(pagination: &Pagination, constraints: &LayoutConstraints) -> Vec<RenderedPage> {
    let total = pagination.page_count();

    pagination
        .numbered()
        .map(|(number, page)| RenderedPage {
            number,
            total,
            bounds: Rect::new(
                0.0,
                (number - 1) as f32 * constraints.page_height,
                constraints.page_width,
                constraints.page_height,
            ),
            markup: page.markup(),
            footer: footer_text(number, total),
        })
        .collect()
}

/// All pages as one HTML string, in order
pub fn render_document(pagination: &Pagination, constraints: &LayoutConstraints) -> String {
    render_pages(pagination, constraints)
        .iter()
        .map(|page| page.to_html(constraints))
        .collect::<Vec<_>>()
        .join("\n")
}
