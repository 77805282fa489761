//! Render output: fixed-size page containers with footers

mod display;

pub use display::{footer_text, render_document, render_pages, RenderedPage};
