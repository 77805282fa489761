//! WASM bindings for the paged view

use crate::export::slice_capture;
use crate::layout::PagedView;
use js_sys::Array;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-exposed paged view wrapper
///
/// The host calls `setContent` on every editor change and `onFrame` from
/// `requestAnimationFrame`.
#[wasm_bindgen]
pub struct WasmPagedView {
    view: PagedView,
}

#[wasm_bindgen]
impl WasmPagedView {
    /// Create a view with US Letter pages at 96 DPI
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            view: PagedView::new(),
        }
    }

    /// Record the editor's current markup
    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&mut self, html: &str) {
        self.view.content_changed(html);
    }

    /// Run the pending pagination pass, if any; returns whether pages changed
    #[wasm_bindgen(js_name = onFrame)]
    pub fn on_frame(&mut self) -> bool {
        self.view.on_frame()
    }

    #[wasm_bindgen(js_name = hasPending)]
    pub fn has_pending(&self) -> bool {
        self.view.has_pending()
    }

    /// Get page count
    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.view.page_count()
    }

    /// Rendered pages as a JSON array
    #[wasm_bindgen(js_name = renderJson)]
    pub fn render_json(&self) -> String {
        serde_json::to_string(&self.view.render()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Page containers as an array of HTML strings
    #[wasm_bindgen(js_name = pageMarkup)]
    pub fn page_markup(&self) -> Array {
        let constraints = *self.view.constraints();
        self.view
            .render()
            .iter()
            .map(|page| JsValue::from_str(&page.to_html(&constraints)))
            .collect()
    }

    /// Y offsets at which to cut a full-content PDF capture
    #[wasm_bindgen(js_name = captureOffsets)]
    pub fn capture_offsets(&self, capture_height: f32) -> Vec<f32> {
        slice_capture(capture_height, self.view.constraints().page_height)
            .iter()
            .map(|slice| slice.offset_y)
            .collect()
    }
}

impl Default for WasmPagedView {
    fn default() -> Self {
        Self::new()
    }
}
