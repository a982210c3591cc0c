//! The trimming session binding.
//!
//! A [`TrimSession`] bundles the crop-frame layout, the gesture adapter and
//! the viewport into one object the host drives: feed it the display size,
//! the image size and raw pointer/scale events, read back the draw transform
//! each frame, and call `trim` when the user commits.
//!
//! # Example
//!
//! ```typescript
//! import init, { TrimSession, decode_image } from '@imagetrim/wasm';
//!
//! await init();
//!
//! const session = new TrimSession({ maximum_scale: 2.0 });
//! session.layout(canvas.width, canvas.height);
//! session.set_image(bitmap.width, bitmap.height);
//!
//! canvas.onpointerdown = (e) => session.pointer_down(e.pointerId, e.x, e.y);
//! canvas.onpointermove = (e) => session.pointer_move(e.pointerId, e.x, e.y);
//! canvas.onpointerup = (e) => session.pointer_up(e.pointerId, e.x, e.y);
//!
//! // Each frame:
//! const [a, b, c, d, tx, ty] = session.draw_transform();
//! ctx.setTransform(a, b, c, d, tx, ty);
//! ```

use imagetrim_core::frame::FrameLayout;
use imagetrim_core::geometry::Rect;
use imagetrim_core::gesture::{
    GestureAdapter, PointerEvent, PointerPhase, ScaleEvent, ScalePhase,
};
use imagetrim_core::trim::trim_bitmap;
use imagetrim_core::viewport::Viewport;
use imagetrim_core::TrimOptions;
use wasm_bindgen::prelude::*;

use crate::types::JsBitmap;

/// An interactive trimming session.
///
/// Owns all state for one image being trimmed; create a fresh session for
/// each image.
#[wasm_bindgen]
pub struct TrimSession {
    layout: FrameLayout,
    gestures: GestureAdapter,
    viewport: Viewport,
    jpeg_quality: u8,
}

#[wasm_bindgen]
impl TrimSession {
    /// Create a session.
    ///
    /// `options` is a plain object matching `TrimOptions`; missing fields
    /// take their defaults, and `undefined`/`null` means all defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<TrimSession, JsValue> {
        let options: TrimOptions = if options.is_undefined() || options.is_null() {
            TrimOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        Ok(TrimSession {
            layout: FrameLayout::new(options.frame_weight, options.frame_width),
            gestures: GestureAdapter::new(),
            viewport: Viewport::with_maximum_scale(options.maximum_scale),
            jpeg_quality: options.jpeg_quality,
        })
    }

    /// Set the display area size in display units.
    ///
    /// Call on initial layout and whenever the host view resizes. Returns
    /// `true` when the crop frame changed.
    pub fn layout(&mut self, width: f32, height: f32) -> bool {
        let changed = self.layout.relayout(width, height);
        if changed {
            // A layout pass that yields no frame (collapsed view, oversized
            // stroke) must also take the old frame out of the viewport, so
            // gestures and trim stop instead of using a stale rectangle.
            match self.layout.frame() {
                Some(frame) => self.viewport.set_frame(frame.bounds),
                None => self.viewport.set_frame(Rect::default()),
            }
        }
        changed
    }

    /// Set the displayed image's dimensions in drawable units.
    ///
    /// The drawable may be a downsampled preview; pass the full source
    /// dimensions to `trim` later.
    pub fn set_image(&mut self, width: u32, height: u32) {
        self.viewport.set_image(width, height);
    }

    /// Report a pointer going down.
    pub fn pointer_down(&mut self, pointer_id: u32, x: f32, y: f32) {
        self.pointer(pointer_id, x, y, PointerPhase::Down);
    }

    /// Report a pointer moving.
    pub fn pointer_move(&mut self, pointer_id: u32, x: f32, y: f32) {
        self.pointer(pointer_id, x, y, PointerPhase::Move);
    }

    /// Report a pointer lifting.
    pub fn pointer_up(&mut self, pointer_id: u32, x: f32, y: f32) {
        self.pointer(pointer_id, x, y, PointerPhase::Up);
    }

    /// Report the start of a pinch, latching the focal point.
    pub fn scale_begin(&mut self, focal_x: f32, focal_y: f32) {
        self.scale(1.0, focal_x, focal_y, ScalePhase::Begin);
    }

    /// Report an incremental pinch factor.
    pub fn scale_update(&mut self, factor: f32, focal_x: f32, focal_y: f32) {
        self.scale(factor, focal_x, focal_y, ScalePhase::Update);
    }

    /// Report the end of a pinch.
    pub fn scale_end(&mut self) {
        self.scale(1.0, 0.0, 0.0, ScalePhase::End);
    }

    /// Rotate the image by the given number of degrees (clockwise positive).
    ///
    /// Rotation re-fits the image to the frame, discarding any pan and zoom.
    pub fn rotate_by(&mut self, degrees: f32) {
        self.viewport.rotate_by(degrees);
    }

    /// The accumulated rotation in degrees, normalized to `[0, 360)`.
    pub fn rotation(&self) -> f32 {
        self.viewport.rotation()
    }

    /// The current user zoom above cover fit.
    pub fn zoom(&self) -> f32 {
        self.viewport.zoom()
    }

    /// The current draw transform as `[a, b, c, d, tx, ty]`, matching the
    /// argument order of `CanvasRenderingContext2D.setTransform`.
    pub fn draw_transform(&self) -> js_sys::Float32Array {
        let t = self.viewport.draw_transform();
        js_sys::Float32Array::from(&[t.a, t.b, t.c, t.d, t.tx, t.ty][..])
    }

    /// The crop frame's logical bounds as `[left, top, right, bottom]`, or
    /// `null` before the first layout pass.
    pub fn frame_rect(&self) -> Option<js_sys::Float32Array> {
        self.layout.frame().map(|f| rect_to_array(f.bounds))
    }

    /// The stroke-centered border rectangle as `[left, top, right, bottom]`,
    /// or `null` before the first layout pass.
    pub fn stroke_rect(&self) -> Option<js_sys::Float32Array> {
        self.layout.frame().map(|f| rect_to_array(f.stroke))
    }

    /// Extract the framed region from the full-resolution source bitmap.
    pub fn trim(&self, source: &JsBitmap) -> Result<JsBitmap, JsValue> {
        let bitmap = source.to_bitmap();
        trim_bitmap(&bitmap, &self.viewport)
            .map(JsBitmap::from_bitmap)
            .map_err(|e| {
                web_sys::console::warn_1(&JsValue::from_str(&format!("trim failed: {e}")));
                JsValue::from_str(&e.to_string())
            })
    }

    /// Extract the framed region and encode it as JPEG bytes, using the
    /// session's configured quality.
    pub fn trim_to_jpeg(&self, source: &JsBitmap) -> Result<Vec<u8>, JsValue> {
        let bitmap = source.to_bitmap();
        let trimmed =
            trim_bitmap(&bitmap, &self.viewport).map_err(|e| JsValue::from_str(&e.to_string()))?;
        imagetrim_core::encode::encode_jpeg(&trimmed, self.jpeg_quality)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl TrimSession {
    fn pointer(&mut self, pointer_id: u32, x: f32, y: f32, phase: PointerPhase) {
        let event = PointerEvent {
            pointer_id,
            x,
            y,
            phase,
        };
        if let Some(gesture) = self.gestures.on_pointer(event) {
            self.viewport.apply(gesture);
        }
    }

    fn scale(&mut self, factor: f32, focal_x: f32, focal_y: f32, phase: ScalePhase) {
        let event = ScaleEvent {
            factor,
            focal_x,
            focal_y,
            phase,
        };
        if let Some(gesture) = self.gestures.on_scale(event) {
            self.viewport.apply(gesture);
        }
    }
}

fn rect_to_array(rect: Rect) -> js_sys::Float32Array {
    js_sys::Float32Array::from(&[rect.left, rect.top, rect.right, rect.bottom][..])
}

/// Tests for session logic that does not touch JsValue.
///
/// Constructor and trim paths return `Result<T, JsValue>` and can only run
/// on wasm32 targets; see the `wasm_tests` module below.
#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TrimSession {
        TrimSession {
            layout: FrameLayout::new(0.75, 1.0),
            gestures: GestureAdapter::new(),
            viewport: Viewport::new(),
            jpeg_quality: 100,
        }
    }

    #[test]
    fn test_layout_feeds_frame_to_viewport() {
        let mut s = session();
        assert!(s.layout(1000.0, 1600.0));
        assert!(s.layout.frame().is_some());

        // Same size again is a no-op
        assert!(!s.layout(1000.0, 1600.0));
    }

    #[test]
    fn test_collapsed_layout_clears_viewport_frame() {
        use imagetrim_core::trim::TrimError;

        let mut s = session();
        s.layout(1000.0, 1600.0);
        s.set_image(4000, 3000);
        assert!(s.viewport.trim_rect(4000, 3000).is_ok());

        // The view collapses; the viewport must not keep trimming against
        // the previous frame
        s.layout(0.0, 0.0);
        assert!(s.layout.frame().is_none());
        assert_eq!(
            s.viewport.trim_rect(4000, 3000),
            Err(TrimError::NotLaidOut)
        );

        // Gestures stop too until a usable layout returns
        let before = s.viewport.draw_transform();
        s.pointer_down(1, 10.0, 10.0);
        s.pointer_move(1, 50.0, 50.0);
        assert_eq!(s.viewport.draw_transform(), before);
    }

    #[test]
    fn test_pointer_sequence_pans_viewport() {
        let mut s = session();
        s.layout(1000.0, 1600.0);
        s.set_image(4000, 3000);

        // Zoom in so there is room to pan, then drag left
        s.scale_begin(500.0, 800.0);
        s.scale_update(2.0, 500.0, 800.0);
        let before = s.viewport.draw_transform();

        s.pointer_down(1, 400.0, 800.0);
        s.pointer_move(1, 300.0, 800.0);
        s.pointer_up(1, 300.0, 800.0);

        let after = s.viewport.draw_transform();
        assert!(after.tx < before.tx);
    }

    #[test]
    fn test_scale_sequence_zooms_viewport() {
        let mut s = session();
        s.layout(1000.0, 1600.0);
        s.set_image(4000, 3000);

        s.scale_begin(500.0, 800.0);
        s.scale_update(1.5, 500.0, 800.0);
        s.scale_end();

        assert!(s.zoom() > 1.0);
    }

    #[test]
    fn test_rotation_accumulates_and_normalizes() {
        let mut s = session();
        s.layout(1000.0, 1600.0);
        s.set_image(4000, 3000);

        s.rotate_by(90.0);
        s.rotate_by(90.0);
        assert_eq!(s.rotation(), 180.0);

        s.rotate_by(270.0);
        assert_eq!(s.rotation(), 90.0);
    }

    #[test]
    fn test_events_before_setup_are_harmless() {
        let mut s = session();
        s.pointer_down(1, 10.0, 10.0);
        s.pointer_move(1, 20.0, 20.0);
        s.scale_begin(10.0, 10.0);
        s.scale_update(2.0, 10.0, 10.0);
        s.rotate_by(90.0);

        assert_eq!(s.zoom(), 1.0);
    }
}
