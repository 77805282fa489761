//! Page-break marker detection
//!
//! The editor serializes explicit page breaks either as an element carrying
//! the `page-break` class or as an element with a CSS break property set to
//! force a page. Anything that does not match exactly is ordinary content.

use scraper::ElementRef;

/// Class name the editor puts on break markers
pub const PAGE_BREAK_CLASS: &str = "page-break";

/// Elements that count as content even without text
const REPLACED_ELEMENTS: &[&str] = &["img", "svg", "video", "canvas", "iframe", "table", "hr"];

/// Where a break signal applies relative to its element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreakSignal {
    pub before: bool,
    pub after: bool,
}

impl BreakSignal {
    pub fn is_set(&self) -> bool {
        self.before || self.after
    }
}

/// Detect a page-break signal on a top-level element
pub fn detect(element: &ElementRef<'_>) -> Option<BreakSignal> {
    let mut signal = element
        .value()
        .attr("style")
        .map(style_signal)
        .unwrap_or_default();

    if has_break_class(element) && !signal.is_set() {
        signal.before = true;
    }

    signal.is_set().then_some(signal)
}

/// Check the element's class list for the break marker class
pub fn has_break_class(element: &ElementRef<'_>) -> bool {
    element
        .value()
        .classes()
        .any(|class| class.eq_ignore_ascii_case(PAGE_BREAK_CLASS))
}

/// Parse an inline style declaration for forced page breaks
pub fn style_signal(style: &str) -> BreakSignal {
    let mut signal = BreakSignal::default();

    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value
            .trim()
            .trim_end_matches("!important")
            .trim()
            .to_ascii_lowercase();

        match (property.as_str(), value.as_str()) {
            ("page-break-before", "always") | ("break-before", "page") => signal.before = true,
            ("page-break-after", "always") | ("break-after", "page") => signal.after = true,
            _ => {}
        }
    }

    signal
}

/// Whether the element renders anything besides the break itself
///
/// A replaced element such as `<img>` is its own content. `<hr>` is the
/// exception at the top level, since editors use it as the bare marker.
pub fn has_content(element: &ElementRef<'_>) -> bool {
    if element.text().any(|text| !text.trim().is_empty()) {
        return true;
    }

    let name = element.value().name();
    if name != "hr" && REPLACED_ELEMENTS.contains(&name) {
        return true;
    }

    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|child| REPLACED_ELEMENTS.contains(&child.value().name()))
}
