//! Crop-frame layout.
//!
//! Given an available display area, padding insets, a frame-to-view weight
//! ratio and a stroke width, this module computes the centered square
//! crop-frame rectangle. Two rectangles are exposed: the logical bounds used
//! for all coordinate mapping, and a stroke-centered rectangle used only for
//! drawing the dashed border.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Padding insets around the available display area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Insets {
    pub fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// The user-visible cropping rectangle in the display's local coordinates.
///
/// Produced only by [`FrameLayout`]; read-only to downstream components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropFrame {
    /// Logical crop rectangle used for coordinate mapping.
    pub bounds: Rect,
    /// Stroke-centered rectangle for drawing the dashed border. Irrelevant
    /// to extraction.
    pub stroke: Rect,
}

/// Computes and caches the crop frame for the current display size.
///
/// The frame is a square whose side is `min(padded_w, padded_h) * weight`,
/// inset by the stroke width on each side and centered within the padded
/// area. Relayout with an unchanged size is a no-op so downstream consumers
/// are not poked redundantly.
#[derive(Debug, Clone)]
pub struct FrameLayout {
    frame_weight: f32,
    frame_width: f32,
    padding: Insets,
    size: Option<(f32, f32)>,
    frame: Option<CropFrame>,
}

impl FrameLayout {
    /// Create a layout with the given frame-to-view weight ratio and stroke
    /// width. The common defaults are `0.75` and `1.0`.
    pub fn new(frame_weight: f32, frame_width: f32) -> Self {
        Self {
            frame_weight,
            frame_width,
            padding: Insets::default(),
            size: None,
            frame: None,
        }
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// The current crop frame, if a layout pass has produced one.
    pub fn frame(&self) -> Option<&CropFrame> {
        self.frame.as_ref()
    }

    /// Recompute the frame for a new display size.
    ///
    /// Returns `true` when the frame changed, `false` when the size is
    /// identical to the previous layout pass (in which case the cached frame
    /// is kept bit-identical).
    pub fn relayout(&mut self, width: f32, height: f32) -> bool {
        if self.size == Some((width, height)) {
            return false;
        }
        self.size = Some((width, height));
        self.frame = self.compute(width, height);
        true
    }

    fn compute(&self, width: f32, height: f32) -> Option<CropFrame> {
        let padded_w = width - self.padding.left - self.padding.right;
        let padded_h = height - self.padding.top - self.padding.bottom;
        if padded_w <= 0.0 || padded_h <= 0.0 {
            return None;
        }

        let side = padded_w.min(padded_h) * self.frame_weight - 2.0 * self.frame_width;
        if side <= 0.0 {
            return None;
        }

        let left = self.padding.left + (padded_w - side) / 2.0;
        let top = self.padding.top + (padded_h - side) / 2.0;
        let bounds = Rect::new(left, top, left + side, top + side);
        let stroke = bounds.inset(self.frame_width / 2.0, self.frame_width / 2.0);

        Some(CropFrame { bounds, stroke })
    }
}
