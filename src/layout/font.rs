//! Font metrics for layout

use unicode_segmentation::UnicodeSegmentation;

/// Fixed typography of the page body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub font_family: &'static str,
    /// Body font size in pixels
    pub font_size: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
}

impl Typography {
    pub const DEFAULT: Typography = Typography {
        font_family: "Georgia, 'Times New Roman', serif",
        font_size: 16.0,
        line_height: 1.5,
    };

    /// Line height in pixels
    pub fn line_height_px(&self) -> f32 {
        self.font_size * self.line_height
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Metrics needed for text layout
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    /// Line height in logical pixels
    pub line_height: f32,
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Default width for non-ASCII characters
    pub default_width: f32,
    /// Font size the widths were computed for
    pub em: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::for_typography(&Typography::DEFAULT)
    }
}

impl FontMetrics {
    pub fn new(line_height: f32, char_widths: Vec<f32>, default_width: f32, em: f32) -> Self {
        Self {
            line_height,
            char_widths,
            default_width,
            em,
        }
    }

    /// Every character has the same advance
    pub fn monospace(advance: f32, line_height: f32) -> Self {
        Self::new(line_height, vec![advance; 128], advance, advance * 2.0)
    }

    /// Approximate proportional metrics for the body typography
    pub fn for_typography(typography: &Typography) -> Self {
        let em = typography.font_size;
        let char_widths = (0u8..128).map(|b| ascii_advance(b as char) * em).collect();

        Self {
            line_height: typography.line_height_px(),
            char_widths,
            default_width: 0.5 * em,
            em,
        }
    }

    /// Metrics for the same face at a different size
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            line_height: self.line_height * factor,
            char_widths: self.char_widths.iter().map(|w| w * factor).collect(),
            default_width: self.default_width * factor,
            em: self.em * factor,
        }
    }

    /// Bold faces run slightly wider
    pub fn emboldened(&self) -> Self {
        Self {
            char_widths: self.char_widths.iter().map(|w| w * 1.05).collect(),
            default_width: self.default_width * 1.05,
            ..self.clone()
        }
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> f32 {
        if c == '\t' {
            return self.width(' ') * 4.0;
        }
        if c.is_control() {
            return 0.0;
        }
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        if is_wide(c) {
            return self.em;
        }
        self.default_width
    }

    /// Advance width of a run of text
    pub fn text_width(&self, text: &str) -> f32 {
        text.graphemes(true)
            .map(|g| match g.chars().next() {
                // Combining marks ride on their base character
                Some(base) => self.width(base),
                None => 0.0,
            })
            .sum()
    }
}

/// Advance of an ASCII character in ems, modelled on a serif text face
fn ascii_advance(c: char) -> f32 {
    match c {
        ' ' => 0.25,
        'i' | 'j' | 'l' | '!' | '|' | '\'' | '.' | ',' | ':' | ';' => 0.28,
        'f' | 't' | 'r' | 'I' | 'J' | '(' | ')' | '[' | ']' | '-' | '"' | '/' => 0.33,
        'm' | 'w' => 0.78,
        'M' | 'W' | '@' => 0.89,
        'A'..='Z' => 0.67,
        _ => 0.5,
    }
}

/// East Asian wide and fullwidth ranges occupy a full em
fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1FAFF
        | 0x20000..=0x3FFFD)
}
