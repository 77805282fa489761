//! Block measurement
//!
//! The paginator asks a [`Measure`] implementation for the vertical footprint
//! of each block. [`TextMeasurer`] lays the fragment out natively with the
//! body typography and the column width of the page.

use crate::document::BlockKind;
use crate::layout::engine::LayoutConstraints;
use crate::layout::font::{FontMetrics, Typography};
use crate::layout::line_break::LineBreaker;
use log::warn;
use scraper::{ElementRef, Html};

/// Height given to blocks that have nothing to measure
pub const MIN_BLOCK_HEIGHT: f32 = 24.0;

/// Thickness of a horizontal rule
pub const RULE_THICKNESS: f32 = 2.0;

/// Padding inside table cells, per side
pub const CELL_PADDING: f32 = 4.0;

/// Table border width
pub const CELL_BORDER: f32 = 1.0;

/// Tags that start a new line when nested inside another block
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "li", "ol", "p", "pre", "section",
    "table", "tr", "ul",
];

/// Reports the rendered height of one block fragment
///
/// Implementations must not fail: anything unmeasurable reports a fallback
/// height. Calls must be independent of each other.
pub trait Measure {
    /// Height in pixels, margins included
    fn measure(&mut self, markup: &str) -> f32;
}

impl<F> Measure for F
where
    F: FnMut(&str) -> f32,
{
    fn measure(&mut self, markup: &str) -> f32 {
        self(markup)
    }
}

/// Native text-layout measurer
#[derive(Debug, Clone)]
pub struct TextMeasurer {
    column_width: f32,
    typography: Typography,
    body: FontMetrics,
    line_breaker: LineBreaker,
    /// Text of the fragment being measured
    scratch: String,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new(&LayoutConstraints::LETTER, Typography::DEFAULT)
    }
}

impl Measure for TextMeasurer {
    fn measure(&mut self, markup: &str) -> f32 {
        self.scratch.clear();
        let height = self.measure_fragment(markup);
        self.scratch.clear();

        match height {
            Some(h) if h.is_finite() && h >= 0.0 => h,
            Some(h) => {
                warn!("discarding unusable block height {h}");
                MIN_BLOCK_HEIGHT
            }
            None => MIN_BLOCK_HEIGHT,
        }
    }
}

impl TextMeasurer {
    pub fn new(constraints: &LayoutConstraints, typography: Typography) -> Self {
        Self {
            column_width: constraints.content_width(),
            typography,
            body: FontMetrics::for_typography(&typography),
            line_breaker: LineBreaker::new(),
            scratch: String::new(),
        }
    }

    /// Replace the body font metrics (e.g. with metrics read from a real font)
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.body = metrics;
        self
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    fn measure_fragment(&mut self, markup: &str) -> Option<f32> {
        if markup.trim().is_empty() {
            return None;
        }

        let fragment = Html::parse_fragment(markup);
        let root = fragment.root_element();

        if let Some(element) = root.children().find_map(ElementRef::wrap) {
            return Some(self.measure_element(element));
        }

        // Bare text renders as an anonymous paragraph
        let has_text = root.text().any(|t| !t.trim().is_empty());
        if !has_text {
            return None;
        }
        let kind = BlockKind::Paragraph;
        let content = self.text_height(root, self.column_width, None);
        let (top, bottom) = kind.margins(self.typography.font_size);
        Some(top + content + bottom)
    }

    fn measure_element(&mut self, element: ElementRef<'_>) -> f32 {
        let kind = BlockKind::from_tag(element.value().name());
        let width = self.column_width - kind.inset();

        let content = match kind {
            BlockKind::Heading { .. } => {
                let metrics = self.body.scaled(kind.font_scale()).emboldened();
                self.text_height(element, width, Some(&metrics))
            }
            BlockKind::List { .. } => self.list_height(element, width),
            BlockKind::Table => self.table_height(element),
            BlockKind::Preformatted => self.preformatted_height(element),
            BlockKind::Rule => RULE_THICKNESS,
            BlockKind::Image => self.image_height(element),
            BlockKind::PageBreak => 0.0,
            BlockKind::Paragraph | BlockKind::Blockquote | BlockKind::Other => {
                self.text_height(element, width, None)
            }
        };

        let (top, bottom) = kind.margins(self.typography.font_size);
        top + content + bottom
    }

    /// Height of wrapped inline content; empty content still takes a line
    fn text_height(
        &mut self,
        element: ElementRef<'_>,
        width: f32,
        metrics: Option<&FontMetrics>,
    ) -> f32 {
        self.scratch.clear();
        collect_text(element, &mut self.scratch);

        let metrics = metrics.unwrap_or(&self.body);
        let lines = self
            .line_breaker
            .count_lines(&self.scratch, width, metrics);
        self.scratch.clear();

        lines as f32 * metrics.line_height
    }

    fn list_height(&mut self, list: ElementRef<'_>, width: f32) -> f32 {
        let items: Vec<_> = list
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "li")
            .collect();

        if items.is_empty() {
            return self.body.line_height;
        }

        items
            .into_iter()
            .map(|item| self.text_height(item, width, None))
            .sum()
    }

    fn table_height(&mut self, table: ElementRef<'_>) -> f32 {
        let rows: Vec<_> = table
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|e| e.value().name() == "tr")
            .collect();

        if rows.is_empty() {
            return self.body.line_height + 2.0 * CELL_BORDER;
        }

        let mut height = CELL_BORDER;
        for row in rows {
            let cells: Vec<_> = row
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|c| matches!(c.value().name(), "td" | "th"))
                .collect();

            let columns = cells.len().max(1) as f32;
            let cell_width =
                self.column_width / columns - 2.0 * CELL_PADDING - CELL_BORDER;

            let mut row_content = self.body.line_height;
            for cell in cells {
                row_content = row_content.max(self.text_height(cell, cell_width, None));
            }
            height += row_content + 2.0 * CELL_PADDING + CELL_BORDER;
        }
        height
    }

    fn preformatted_height(&self, pre: ElementRef<'_>) -> f32 {
        let text: String = pre.text().collect();
        let text = text.strip_suffix('\n').unwrap_or(&text);
        let lines = text.split('\n').count().max(1);
        lines as f32 * self.body.line_height
    }

    fn image_height(&self, image: ElementRef<'_>) -> f32 {
        let Some(height) = image.value().attr("height").and_then(parse_pixels) else {
            return MIN_BLOCK_HEIGHT;
        };

        // Browsers shrink wide images to the column, keeping the aspect ratio
        match image.value().attr("width").and_then(parse_pixels) {
            Some(width) if width > self.column_width => height * self.column_width / width,
            _ => height,
        }
    }
}

/// Collect inline text the way it renders: whitespace collapsed, `<br>` as a
/// newline and nested blocks on their own lines
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(el) = ElementRef::wrap(child) {
            match el.value().name() {
                "br" => out.push('\n'),
                "script" | "style" | "template" => {}
                name if BLOCK_TAGS.contains(&name) => {
                    end_line(out);
                    collect_text(el, out);
                    end_line(out);
                }
                "td" | "th" => {
                    collect_text(el, out);
                    push_space(out);
                }
                _ => collect_text(el, out),
            }
        } else if let Some(text) = child.value().as_text() {
            for c in text.chars() {
                if c.is_whitespace() {
                    push_space(out);
                } else {
                    out.push(c);
                }
            }
        }
    }
}

fn push_space(out: &mut String) {
    if !(out.is_empty() || out.ends_with(' ') || out.ends_with('\n')) {
        out.push(' ');
    }
}

fn end_line(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn parse_pixels(value: &str) -> Option<f32> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value).trim();
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurer() -> TextMeasurer {
        TextMeasurer::default()
    }

    #[test]
    fn test_empty_fragment_uses_fallback() {
        let mut m = measurer();
        assert_eq!(m.measure(""), MIN_BLOCK_HEIGHT);
        assert_eq!(m.measure("   \n"), MIN_BLOCK_HEIGHT);
        assert_eq!(m.measure("<!-- nothing -->"), MIN_BLOCK_HEIGHT);
    }

    #[test]
    fn test_single_line_paragraph() {
        let mut m = measurer();
        // One 24px line plus the 12px bottom margin
        assert_eq!(m.measure("<p>Hello</p>"), 36.0);
        assert_eq!(m.measure("<p></p>"), 36.0);
        assert_eq!(m.measure("<p><br></p>"), 36.0);
    }

    #[test]
    fn test_bare_text_measures_as_paragraph() {
        let mut m = measurer();
        assert_eq!(m.measure("Hello"), m.measure("<p>Hello</p>"));
    }

    #[test]
    fn test_line_breaks() {
        let mut m = measurer();
        assert_eq!(m.measure("<p>a<br>b<br>c</p>"), 3.0 * 24.0 + 12.0);
    }

    #[test]
    fn test_long_paragraph_wraps() {
        let mut m = measurer();
        let short = m.measure("<p>word</p>");
        let long = m.measure(&format!("<p>{}</p>", "word ".repeat(200)));
        assert!(long > short * 5.0);
    }

    #[test]
    fn test_heading_taller_than_paragraph() {
        let mut m = measurer();
        assert!(m.measure("<h1>Title</h1>") > m.measure("<p>Title</p>"));
    }

    #[test]
    fn test_list_counts_items() {
        let mut m = measurer();
        assert_eq!(m.measure("<ul><li>a</li><li>b</li><li>c</li></ul>"), 3.0 * 24.0 + 12.0);
    }

    #[test]
    fn test_table_rows() {
        let mut m = measurer();
        let one = m.measure("<table><tr><td>a</td><td>b</td></tr></table>");
        let two = m.measure("<table><tr><td>a</td></tr><tr><td>b</td></tr></table>");
        assert!(two > one);
        // border + row (line + padding + border) + bottom margin
        assert_eq!(one, 1.0 + 24.0 + 8.0 + 1.0 + 12.0);
    }

    #[test]
    fn test_preformatted_keeps_lines() {
        let mut m = measurer();
        assert_eq!(m.measure("<pre>a\nb\nc</pre>"), 3.0 * 24.0 + 12.0);
    }

    #[test]
    fn test_image_height() {
        let mut m = measurer();
        assert_eq!(m.measure(r#"<img src="a.png" height="200">"#), 212.0);
        // 1248px wide image is shrunk to the 624px column
        assert_eq!(m.measure(r#"<img src="a.png" width="1248" height="400">"#), 212.0);
        assert_eq!(m.measure(r#"<img src="a.png">"#), MIN_BLOCK_HEIGHT + 12.0);
    }

    #[test]
    fn test_measurement_is_order_independent() {
        let blocks = [
            "<p>alpha beta gamma</p>",
            "<h2>Heading</h2>",
            "<ul><li>one</li><li>two</li></ul>",
            "",
        ];
        let mut forward = measurer();
        let first: Vec<f32> = blocks.iter().map(|b| forward.measure(b)).collect();

        let mut backward = measurer();
        let mut second: Vec<f32> = blocks.iter().rev().map(|b| backward.measure(b)).collect();
        second.reverse();

        assert_eq!(first, second);
        assert!(forward.scratch.is_empty());
    }

    #[test]
    fn test_closure_measurer() {
        let mut fixed = |_: &str| 40.0;
        assert_eq!(fixed.measure("<p>x</p>"), 40.0);
    }

    #[test]
    fn test_parse_pixels() {
        assert_eq!(parse_pixels(" 120px"), Some(120.0));
        assert_eq!(parse_pixels("50%"), None);
        assert_eq!(parse_pixels("-3"), None);
    }
}
