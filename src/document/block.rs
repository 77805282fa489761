//! Block-level element metadata

use serde::Serialize;

/// How a block participates in pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakClass {
    /// Placed on a page like any other content
    Normal,
    /// Closes the current page; never placed itself
    HardBreak,
}

/// The kind of block element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum BlockKind {
    /// Regular paragraph
    #[default]
    Paragraph,
    /// Heading with level (1-6)
    Heading { level: u8 },
    /// Bulleted or numbered list
    List { ordered: bool },
    Table,
    Blockquote,
    Preformatted,
    /// Horizontal rule
    Rule,
    Image,
    /// Any other block-level element (div, section, figure...)
    Other,
    /// Explicit page break marker
    PageBreak,
}

impl BlockKind {
    /// Classify a top-level element by its tag name
    pub fn from_tag(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "p" => BlockKind::Paragraph,
            "h1" => BlockKind::Heading { level: 1 },
            "h2" => BlockKind::Heading { level: 2 },
            "h3" => BlockKind::Heading { level: 3 },
            "h4" => BlockKind::Heading { level: 4 },
            "h5" => BlockKind::Heading { level: 5 },
            "h6" => BlockKind::Heading { level: 6 },
            "ul" => BlockKind::List { ordered: false },
            "ol" => BlockKind::List { ordered: true },
            "table" => BlockKind::Table,
            "blockquote" => BlockKind::Blockquote,
            "pre" => BlockKind::Preformatted,
            "hr" => BlockKind::Rule,
            "img" => BlockKind::Image,
            _ => BlockKind::Other,
        }
    }

    /// Break classification used by the paginator
    pub fn break_class(&self) -> BreakClass {
        match self {
            BlockKind::PageBreak => BreakClass::HardBreak,
            _ => BreakClass::Normal,
        }
    }

    /// Font size multiplier relative to body text
    pub fn font_scale(&self) -> f32 {
        match self {
            BlockKind::Heading { level } => match level {
                1 => 2.0,
                2 => 1.5,
                3 => 1.17,
                4 => 1.0,
                5 => 0.83,
                _ => 0.67,
            },
            _ => 1.0,
        }
    }

    /// Vertical margins (top, bottom) in pixels for a given body font size
    pub fn margins(&self, font_size: f32) -> (f32, f32) {
        match self {
            BlockKind::Heading { level } => {
                let em = match level {
                    1 => 0.67,
                    2 => 0.83,
                    3 => 1.0,
                    4 => 1.33,
                    5 => 1.67,
                    _ => 2.33,
                };
                let margin = em * self.font_scale() * font_size;
                (margin, margin)
            }
            BlockKind::Blockquote => (font_size, font_size),
            BlockKind::Rule => (font_size * 0.5, font_size * 0.5),
            BlockKind::PageBreak => (0.0, 0.0),
            _ => (0.0, font_size * 0.75),
        }
    }

    /// Horizontal space taken out of the body column
    pub fn inset(&self) -> f32 {
        match self {
            BlockKind::List { .. } => 40.0,
            BlockKind::Blockquote => 80.0,
            _ => 0.0,
        }
    }

    /// Check if this is a hard page break
    pub fn is_page_break(&self) -> bool {
        matches!(self, BlockKind::PageBreak)
    }
}

/// One top-level fragment of the document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    kind: BlockKind,
    markup: String,
}

impl Block {
    pub fn new(kind: BlockKind, markup: impl Into<String>) -> Self {
        Self {
            kind,
            markup: markup.into(),
        }
    }

    /// Create a paragraph block
    pub fn paragraph(markup: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph, markup)
    }

    /// Create a hard break marker with no content
    pub fn page_break() -> Self {
        Self::new(BlockKind::PageBreak, String::new())
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Serialized markup of the fragment
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn break_class(&self) -> BreakClass {
        self.kind.break_class()
    }

    pub fn is_hard_break(&self) -> bool {
        self.break_class() == BreakClass::HardBreak
    }
}
