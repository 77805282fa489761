//! Export-side page slicing
//!
//! PDF export does not go through the paginator: it captures the whole
//! document as one tall image and cuts it at fixed page heights.

use log::debug;
use serde::Serialize;

/// One page-sized strip of a full-content capture
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSlice {
    /// 1-based page number
    pub number: usize,
    /// Top of the strip within the capture
    pub offset_y: f32,
    /// Strip height; only the last strip may be shorter than a page
    pub height: f32,
}

/// Cut a capture of `capture_height` pixels into page strips
///
/// Always yields at least one slice.
pub fn slice_capture(capture_height: f32, page_height: f32) -> Vec<CaptureSlice> {
    if !(capture_height.is_finite() && capture_height > 0.0) {
        return vec![CaptureSlice {
            number: 1,
            offset_y: 0.0,
            height: 0.0,
        }];
    }
    if !(page_height.is_finite() && page_height > 0.0) {
        return vec![CaptureSlice {
            number: 1,
            offset_y: 0.0,
            height: capture_height,
        }];
    }

    let count = (capture_height / page_height).ceil().max(1.0) as usize;
    debug!("slicing {capture_height}px capture into {count} pages");

    (0..count)
        .map(|index| {
            let offset_y = index as f32 * page_height;
            CaptureSlice {
                number: index + 1,
                offset_y,
                height: page_height.min(capture_height - offset_y),
            }
        })
        .collect()
}
