//! Imagetrim Core - Interactive crop viewport and trim extraction
//!
//! This crate implements the engine behind an interactive image trimmer:
//! the user pans, zooms and rotates an image inside a fixed square crop
//! frame and the engine extracts exactly the source pixels under the frame.
//!
//! The pieces, leaf first:
//!
//! - [`geometry`] - rectangle and affine-transform value types
//! - [`frame`] - centered square crop-frame layout
//! - [`gesture`] - pointer/scale event records to pan/scale gestures
//! - [`viewport`] - the stateful base/modifier/draw transform engine
//! - [`trim`] - mapping the frame back to source pixels and extracting them
//! - [`raster`] - bitmap rotate/crop/resize primitives
//! - [`decode`] / [`encode`] - image loading and JPEG export glue
//!
//! Everything is synchronous and single-threaded; one [`viewport::Viewport`]
//! serves one viewing session.

pub mod decode;
pub mod encode;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod raster;
pub mod trim;
pub mod viewport;

pub use frame::{CropFrame, FrameLayout, Insets};
pub use geometry::{Rect, Transform};
pub use gesture::{Gesture, GestureAdapter, PointerEvent, PointerPhase, ScaleEvent, ScalePhase};
pub use raster::{Bitmap, FilterType};
pub use trim::{trim_bitmap, trim_rect, TrimError, TrimRect};
pub use viewport::Viewport;

/// Configuration for a trimming session.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrimOptions {
    /// Maximum zoom magnification above cover fit.
    pub maximum_scale: f32,
    /// Frame-to-view weight ratio of the crop frame.
    pub frame_weight: f32,
    /// Width of the dashed line indicating the trimming area.
    pub frame_width: f32,
    /// JPEG quality used when exporting the trimmed result (1-100).
    pub jpeg_quality: u8,
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            maximum_scale: 2.0,
            frame_weight: 0.75,
            frame_width: 1.0,
            jpeg_quality: 100,
        }
    }
}

impl TrimOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
