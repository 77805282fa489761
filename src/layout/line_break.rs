//! Line breaking algorithm

use crate::layout::font::FontMetrics;
use std::ops::Range;
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Layout result for a single line
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    /// Byte range within the text this line covers
    pub byte_range: Range<usize>,
    /// Width of the visible content, trailing whitespace excluded
    pub width: f32,
}

/// Greedy line breaker over UAX #14 break opportunities
#[derive(Debug, Default, Clone, Copy)]
pub struct LineBreaker;

impl LineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Break text into lines no wider than `max_width`
    ///
    /// Empty text still produces one line. A word wider than the line is
    /// broken between grapheme clusters.
    pub fn break_lines(&self, text: &str, max_width: f32, metrics: &FontMetrics) -> Vec<LineLayout> {
        let mut lines = Vec::new();
        if text.is_empty() {
            lines.push(LineLayout {
                byte_range: 0..0,
                width: 0.0,
            });
            return lines;
        }

        // A column narrower than one em would never make progress
        let max_width = max_width.max(metrics.em);

        let mut line_start = 0;
        let mut x: f32 = 0.0;
        let mut visible: f32 = 0.0;
        let mut segment_start = 0;

        for (break_at, opportunity) in linebreaks(text) {
            let segment = &text[segment_start..break_at];
            let ink = metrics.text_width(segment.trim_end());
            let advance = metrics.text_width(segment);

            // Soft wrap before this segment
            if x + ink > max_width && segment_start > line_start {
                lines.push(LineLayout {
                    byte_range: line_start..segment_start,
                    width: visible,
                });
                line_start = segment_start;
                x = 0.0;
                visible = 0.0;
            }

            if ink > max_width {
                // Emergency break inside an overlong word
                for (offset, grapheme) in segment.grapheme_indices(true) {
                    let at = segment_start + offset;
                    let width = metrics.text_width(grapheme);
                    let blank = grapheme.chars().all(char::is_whitespace);

                    if !blank && x + width > max_width && at > line_start {
                        lines.push(LineLayout {
                            byte_range: line_start..at,
                            width: visible,
                        });
                        line_start = at;
                        x = 0.0;
                        visible = 0.0;
                    }

                    x += width;
                    if !blank {
                        visible = x;
                    }
                }
            } else {
                visible = visible.max(x + ink);
                x += advance;
            }

            if matches!(opportunity, BreakOpportunity::Mandatory) && break_at < text.len() {
                lines.push(LineLayout {
                    byte_range: line_start..break_at,
                    width: visible,
                });
                line_start = break_at;
                x = 0.0;
                visible = 0.0;
            }

            segment_start = break_at;
        }

        // Final line
        if line_start < text.len() || lines.is_empty() {
            lines.push(LineLayout {
                byte_range: line_start..text.len(),
                width: visible,
            });
        }

        lines
    }

    /// Number of lines the text occupies
    pub fn count_lines(&self, text: &str, max_width: f32, metrics: &FontMetrics) -> usize {
        self.break_lines(text, max_width, metrics).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> FontMetrics {
        // With 8px per char, 40px width = 5 chars per line
        FontMetrics::monospace(8.0, 10.0)
    }

    #[test]
    fn test_empty_text() {
        let lines = LineBreaker::new().break_lines("", 100.0, &metrics());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].byte_range, 0..0);
    }

    #[test]
    fn test_single_line() {
        let lines = LineBreaker::new().break_lines("Hello", 100.0, &metrics());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].byte_range, 0..5);
        assert_eq!(lines[0].width, 40.0);
    }

    #[test]
    fn test_line_wrap() {
        let lines = LineBreaker::new().break_lines("Hello World", 40.0, &metrics());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].byte_range, 0..6);
        assert_eq!(lines[0].width, 40.0);
        assert_eq!(lines[1].byte_range, 6..11);
    }

    #[test]
    fn test_explicit_newline() {
        let lines = LineBreaker::new().break_lines("Hello\nWorld", 1000.0, &metrics());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].byte_range, 6..11);
    }

    #[test]
    fn test_trailing_newline_adds_no_line() {
        let breaker = LineBreaker::new();
        assert_eq!(breaker.count_lines("Hello\n", 1000.0, &metrics()), 1);
        assert_eq!(breaker.count_lines("Hello\n\n", 1000.0, &metrics()), 2);
        assert_eq!(breaker.count_lines("\n", 1000.0, &metrics()), 1);
    }

    #[test]
    fn test_overlong_word_is_split() {
        let lines = LineBreaker::new().break_lines("abcdefghijkl", 40.0, &metrics());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].byte_range, 0..5);
        assert_eq!(lines[2].byte_range, 10..12);
    }
}
