//! Document model: the editor's markup split into top-level blocks

mod block;
pub mod breaks;

pub use block::{Block, BlockKind, BreakClass};
pub use breaks::{BreakSignal, PAGE_BREAK_CLASS};

use log::trace;
use scraper::{ElementRef, Html};

/// A read-only snapshot of the editor content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Create a document from already classified blocks
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Split editor markup into top-level blocks
    ///
    /// Each top-level element becomes one block. Break markers become
    /// [`BlockKind::PageBreak`] blocks; an element that carries a break
    /// property *and* content keeps its content and gains a separate marker
    /// before or after it. Runs of loose text and inline elements are
    /// wrapped together in one paragraph.
    pub fn from_html(html: &str) -> Self {
        let mut blocks = Vec::new();
        if html.trim().is_empty() {
            return Self { blocks };
        }

        let fragment = Html::parse_fragment(html);
        let mut inline = InlineRun::default();
        for child in fragment.root_element().children() {
            if let Some(element) = ElementRef::wrap(child) {
                if is_inline(&element) && breaks::detect(&element).is_none() {
                    inline.push_element(&element);
                } else {
                    inline.flush(&mut blocks);
                    push_element(element, &mut blocks);
                }
            } else if let Some(text) = child.value().as_text() {
                inline.push_text(text);
            }
        }
        inline.flush(&mut blocks);

        trace!("split document into {} blocks", blocks.len());
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Total number of blocks, markers included
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks that are placed on pages
    pub fn content_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_hard_break()).count()
    }

    /// Number of hard break markers
    pub fn hard_break_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_hard_break()).count()
    }
}

fn push_element(element: ElementRef<'_>, blocks: &mut Vec<Block>) {
    let markup = element.html();
    let kind = BlockKind::from_tag(element.value().name());

    match breaks::detect(&element) {
        None => blocks.push(Block::new(kind, markup)),
        Some(_) if !breaks::has_content(&element) => {
            blocks.push(Block::new(BlockKind::PageBreak, markup));
        }
        Some(signal) => {
            if signal.before {
                blocks.push(Block::page_break());
            }
            blocks.push(Block::new(kind, markup));
            if signal.after {
                blocks.push(Block::page_break());
            }
        }
    }
}

/// Phrasing elements that flow with loose text at the top level
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "br", "cite", "code", "del", "em", "font", "i", "ins", "kbd", "label",
    "mark", "q", "s", "small", "span", "strong", "sub", "sup", "time", "u",
];

fn is_inline(element: &ElementRef<'_>) -> bool {
    let name = element.value().name();
    INLINE_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Consecutive top-level text and inline elements awaiting a paragraph
#[derive(Default)]
struct InlineRun {
    markup: String,
    has_content: bool,
}

impl InlineRun {
    fn push_text(&mut self, text: &str) {
        if !text.trim().is_empty() {
            self.has_content = true;
        }
        self.markup.push_str(&escape_text(text));
    }

    fn push_element(&mut self, element: &ElementRef<'_>) {
        self.has_content = true;
        self.markup.push_str(&element.html());
    }

    fn flush(&mut self, blocks: &mut Vec<Block>) {
        if self.has_content {
            blocks.push(Block::paragraph(format!("<p>{}</p>", self.markup.trim())));
        }
        self.markup.clear();
        self.has_content = false;
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(doc: &Document) -> Vec<BlockKind> {
        doc.blocks().iter().map(Block::kind).collect()
    }

    #[test]
    fn test_empty_document() {
        assert!(Document::from_html("").is_empty());
        assert!(Document::from_html("  \n\t ").is_empty());
    }

    #[test]
    fn test_split_top_level_blocks() {
        let doc = Document::from_html(
            "<h1>Title</h1>\n<p>One</p><ul><li>a</li><li>b</li></ul><!-- note --><table><tr><td>x</td></tr></table>",
        );
        assert_eq!(
            kinds(&doc),
            vec![
                BlockKind::Heading { level: 1 },
                BlockKind::Paragraph,
                BlockKind::List { ordered: false },
                BlockKind::Table,
            ]
        );
        assert_eq!(doc.blocks()[1].markup(), "<p>One</p>");
    }

    #[test]
    fn test_marker_becomes_page_break() {
        let doc = Document::from_html(
            r#"<p>One</p><div class="page-break"></div><p>Two</p>"#,
        );
        assert_eq!(
            kinds(&doc),
            vec![BlockKind::Paragraph, BlockKind::PageBreak, BlockKind::Paragraph]
        );
        assert_eq!(doc.content_block_count(), 2);
        assert_eq!(doc.hard_break_count(), 1);
    }

    #[test]
    fn test_break_property_on_content_keeps_content() {
        let doc = Document::from_html(
            r#"<p>One</p><h2 style="page-break-before: always">Two</h2><p style="break-after: page">Three</p><p>Four</p>"#,
        );
        assert_eq!(
            kinds(&doc),
            vec![
                BlockKind::Paragraph,
                BlockKind::PageBreak,
                BlockKind::Heading { level: 2 },
                BlockKind::Paragraph,
                BlockKind::PageBreak,
                BlockKind::Paragraph,
            ]
        );
    }

    #[test]
    fn test_loose_text_is_wrapped() {
        let doc = Document::from_html("plain <b>&amp;</b> text");
        assert_eq!(kinds(&doc), vec![BlockKind::Paragraph]);
        assert_eq!(doc.blocks()[0].markup(), "<p>plain <b>&amp;</b> text</p>");
    }

    #[test]
    fn test_inline_run_ends_at_block() {
        let doc = Document::from_html("Hello <i>there</i><p>Two</p> tail <br>\n");
        assert_eq!(
            kinds(&doc),
            vec![BlockKind::Paragraph, BlockKind::Paragraph, BlockKind::Paragraph]
        );
        assert_eq!(doc.blocks()[0].markup(), "<p>Hello <i>there</i></p>");
        assert_eq!(doc.blocks()[2].markup(), "<p>tail <br></p>");
    }

    #[test]
    fn test_inline_break_marker_splits_run() {
        let doc = Document::from_html(r#"a<span class="page-break"></span>b"#);
        assert_eq!(
            kinds(&doc),
            vec![BlockKind::Paragraph, BlockKind::PageBreak, BlockKind::Paragraph]
        );
    }

    #[test]
    fn test_top_level_image_with_break_is_kept() {
        let doc = Document::from_html(
            r#"<p>a</p><img src="x.png" height="300" style="page-break-before: always"><p>b</p>"#,
        );
        assert_eq!(
            kinds(&doc),
            vec![
                BlockKind::Paragraph,
                BlockKind::PageBreak,
                BlockKind::Image,
                BlockKind::Paragraph,
            ]
        );
        assert_eq!(doc.content_block_count(), 3);
    }
}
