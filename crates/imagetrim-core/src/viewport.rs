//! Viewport transform engine.
//!
//! The stateful core of the trimmer. It owns three named transform slots:
//!
//! - **base**: the cover-fit of the displayed image into the crop frame,
//!   recomputed on image, frame or rotation change;
//! - **modifier**: the user-driven pan/zoom layered on top of the base;
//! - **draw** (derived): `base` followed by `modifier`, what the host
//!   renders.
//!
//! Two invariants hold after every mutation:
//!
//! 1. The modifier's recovered scale stays within
//!    `[minimum_scale, maximum_scale]`.
//! 2. The mapped image rectangle never leaves the crop frame uncovered on
//!    any side; where the image is smaller than the frame on an axis it is
//!    centered instead.
//!
//! Only the engine's own methods mutate the slots; callers receive copies.

use crate::geometry::{Rect, Transform};
use crate::gesture::Gesture;
use crate::trim::{self, TrimError, TrimRect};

/// Interactive pan/zoom/rotate state over one displayed image and one crop
/// frame.
///
/// Operations are no-ops until both an image and a non-degenerate frame have
/// been supplied.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Intrinsic size of the displayed (possibly downsampled) image.
    drawable: Option<(f32, f32)>,
    frame: Option<Rect>,
    minimum_scale: f32,
    maximum_scale: f32,
    /// Accumulated rotation in degrees, always in `[0, 360)`.
    rotation: f32,
    base: Transform,
    modify: Transform,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create an engine with the default maximum zoom of 2x above cover fit.
    pub fn new() -> Self {
        Self::with_maximum_scale(2.0)
    }

    /// Create an engine with a custom maximum zoom multiplier.
    pub fn with_maximum_scale(maximum_scale: f32) -> Self {
        Self {
            drawable: None,
            frame: None,
            minimum_scale: 1.0,
            maximum_scale: maximum_scale.max(1.0),
            rotation: 0.0,
            base: Transform::identity(),
            modify: Transform::identity(),
        }
    }

    pub fn maximum_scale(&self) -> f32 {
        self.maximum_scale
    }

    pub fn set_maximum_scale(&mut self, maximum_scale: f32) {
        self.maximum_scale = maximum_scale.max(self.minimum_scale);
    }

    /// Accumulated rotation in degrees, in `[0, 360)`.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Recovered scale of the modifier transform, relative to cover fit.
    pub fn zoom(&self) -> f32 {
        self.modify.scale()
    }

    /// The composed draw transform for the host to render with.
    pub fn draw_transform(&self) -> Transform {
        self.base.post_concat(self.modify)
    }

    /// The displayed image's rectangle after the draw transform.
    pub fn image_rect(&self) -> Option<Rect> {
        let (w, h) = self.drawable?;
        Some(self.draw_transform().map_rect(Rect::from_size(w, h)))
    }

    /// Set (or swap) the displayed image's intrinsic dimensions.
    ///
    /// Recomputes the cover-fit base transform and discards any pan/zoom.
    pub fn set_image(&mut self, width: u32, height: u32) {
        self.drawable = if width == 0 || height == 0 {
            None
        } else {
            Some((width as f32, height as f32))
        };
        self.update_base();
    }

    /// Install a new crop frame, typically after a layout pass.
    ///
    /// A degenerate frame leaves the engine in the not-laid-out state.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = (!frame.is_empty()).then_some(frame);
        self.update_base();
    }

    /// Rotate by `degrees`, accumulated modulo 360.
    ///
    /// The base transform is recomputed for the new orientation and the
    /// modifier is reset, so prior pan/zoom is intentionally discarded
    /// (rotation re-centers).
    pub fn rotate_by(&mut self, degrees: f32) {
        self.rotation = (self.rotation + degrees).rem_euclid(360.0);
        self.update_base();
    }

    /// Dispatch a gesture from the adapter.
    pub fn apply(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Scale {
                factor,
                focal_x,
                focal_y,
            } => self.on_scale(factor, focal_x, focal_y),
            Gesture::Pan { dx, dy } => self.on_pan(dx, dy),
        }
    }

    /// Apply an incremental pinch factor about a focal point.
    ///
    /// The raw factor is first divided by the current zoom so pinch
    /// sensitivity feels constant regardless of zoom level; changing this
    /// changes pinch feel. The post-scale zoom is then clamped to
    /// `[minimum_scale, maximum_scale]` by adjusting the factor so the bound
    /// is hit exactly rather than ignoring the gesture.
    pub fn on_scale(&mut self, factor: f32, focal_x: f32, focal_y: f32) {
        if !self.ready() {
            return;
        }

        let current = self.modify.scale();
        let mut factor = if factor >= 1.0 {
            1.0 + (factor - 1.0) / current
        } else {
            1.0 - (1.0 - factor) / current
        };

        let proposed = factor * current;
        if proposed < self.minimum_scale {
            factor = self.minimum_scale / current;
        } else if proposed > self.maximum_scale {
            factor = self.maximum_scale / current;
        }

        self.modify = self.modify.post_scale(factor, focal_x, focal_y);
        self.clamp_to_frame();
    }

    /// Apply an incremental pan.
    pub fn on_pan(&mut self, dx: f32, dy: f32) {
        if !self.ready() {
            return;
        }
        self.modify = self.modify.post_translate(dx, dy);
        self.clamp_to_frame();
    }

    /// Compute the source-pixel rectangle the current view would trim.
    ///
    /// `source_width`/`source_height` are the dimensions of the original
    /// bitmap, which may be larger than the displayed drawable when the host
    /// downsampled it for display.
    pub fn trim_rect(
        &self,
        source_width: u32,
        source_height: u32,
    ) -> Result<TrimRect, TrimError> {
        let (drawable_w, drawable_h) = self.drawable.ok_or(TrimError::NoImage)?;
        let frame = self.frame.ok_or(TrimError::NotLaidOut)?;
        trim::trim_rect(
            &self.draw_transform(),
            frame,
            drawable_w,
            drawable_h,
            source_width,
            source_height,
            self.rotation,
        )
    }

    fn ready(&self) -> bool {
        self.drawable.is_some() && self.frame.is_some()
    }

    /// Recompute the base transform as the minimal-covering fit of the image
    /// into the frame: cover scale, center on the frame, then rotate about
    /// the frame center. Resets the modifier and re-clamps.
    fn update_base(&mut self) {
        let (Some((w, h)), Some(frame)) = (self.drawable, self.frame) else {
            return;
        };

        let scale = (frame.width() / w).max(frame.height() / h);
        self.base = Transform::identity()
            .post_scale(scale, 0.0, 0.0)
            .post_translate(
                frame.center_x() - w * scale / 2.0,
                frame.center_y() - h * scale / 2.0,
            )
            .post_rotate(self.rotation, frame.center_x(), frame.center_y());
        self.modify = Transform::identity();
        self.clamp_to_frame();
    }

    /// Keep the crop frame covered by the image.
    ///
    /// For each axis independently: center the image when it is smaller than
    /// the frame, otherwise snap a retreating edge back flush with the
    /// frame. The correction is folded into the modifier as a translation;
    /// the gesture itself is never rejected.
    fn clamp_to_frame(&mut self) {
        let (Some(image), Some(frame)) = (self.image_rect(), self.frame) else {
            return;
        };

        let dx = if image.width() <= frame.width() {
            frame.left + (frame.width() - image.width()) / 2.0 - image.left
        } else if image.left > frame.left {
            frame.left - image.left
        } else if image.right < frame.right {
            frame.right - image.right
        } else {
            0.0
        };

        let dy = if image.height() <= frame.height() {
            frame.top + (frame.height() - image.height()) / 2.0 - image.top
        } else if image.top > frame.top {
            frame.top - image.top
        } else if image.bottom < frame.bottom {
            frame.bottom - image.bottom
        } else {
            0.0
        };

        self.modify = self.modify.post_translate(dx, dy);
    }
}
