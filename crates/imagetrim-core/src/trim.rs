//! Trim extraction: mapping the crop frame back to source pixels.
//!
//! At commit time the current draw transform, crop frame and source
//! dimensions determine which pixels of the original bitmap fall inside the
//! frame. [`trim_rect`] does the pure coordinate mapping; [`trim_bitmap`]
//! performs the actual pixel extraction as two separate operations, rotating
//! the full bitmap first and cropping second. Combining rotation and crop
//! into a single matrix-sampled read is deliberately avoided: on large
//! sources it is both memory-hungry and prone to aliasing.

use crate::geometry::{Rect, Transform};
use crate::raster::{self, Bitmap};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure conditions of the trim pipeline.
///
/// All of these are recovered locally and reported to the caller; the core
/// never aborts. User-visible messaging is the host's responsibility.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrimError {
    /// No source image has been set on the viewport.
    #[error("no source image has been set")]
    NoImage,

    /// No layout pass has established a crop frame yet.
    #[error("no layout pass has established a crop frame")]
    NotLaidOut,

    /// The crop frame has zero area.
    #[error("crop frame has zero area")]
    DegenerateFrame,

    /// The computed crop rectangle falls outside the rotated source.
    #[error("trim rectangle {width}x{height} at ({left}, {top}) falls outside the rotated source")]
    OutOfBounds {
        left: i64,
        top: i64,
        width: i64,
        height: i64,
    },

    /// A raster operation was asked for impossible dimensions.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A bitmap's pixel buffer does not match its stated dimensions.
    #[error("invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// The pixel rectangle to cut, in the rotated source's coordinate space,
/// plus the rotation to apply to the source before cropping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    /// Degrees to rotate the full source bitmap before cropping.
    pub rotation: f32,
}

/// Map the crop frame back into source-pixel coordinates.
///
/// Steps:
/// 1. recover the uniform scale from the draw transform's linear part;
/// 2. map the displayed image's rectangle into display space;
/// 3. express the frame relative to that rectangle in drawable-local units;
/// 4. scale up by `source_width / drawable_width` to undo any display
///    downsampling;
/// 5. truncate to integers and clamp against the rotated source bounds.
///
/// An empty result after clamping is rejected as [`TrimError::OutOfBounds`].
pub fn trim_rect(
    draw: &Transform,
    frame: Rect,
    drawable_width: f32,
    drawable_height: f32,
    source_width: u32,
    source_height: u32,
    rotation: f32,
) -> Result<TrimRect, TrimError> {
    if frame.is_empty() {
        return Err(TrimError::DegenerateFrame);
    }
    if drawable_width <= 0.0 || drawable_height <= 0.0 || source_width == 0 || source_height == 0
    {
        return Err(TrimError::NoImage);
    }

    let scale = draw.scale();
    if scale <= f32::EPSILON {
        return Err(TrimError::DegenerateFrame);
    }

    let image_rect = draw.map_rect(Rect::from_size(drawable_width, drawable_height));

    // Frame rectangle in drawable-local coordinates
    let left = (frame.left - image_rect.left) / scale;
    let top = (frame.top - image_rect.top) / scale;
    let width = frame.width() / scale;
    let height = frame.height() / scale;

    // Drawable-local to source pixels; the displayed image may have been
    // downsampled from the original
    let src_scale = source_width as f32 / drawable_width;
    let src_left = (left * src_scale) as i64;
    let src_top = (top * src_scale) as i64;
    let src_width = (width * src_scale) as i64;
    let src_height = (height * src_scale) as i64;

    let (rotated_w, rotated_h) = raster::rotated_bounds(source_width, source_height, rotation);
    let clamped_left = src_left.clamp(0, rotated_w as i64);
    let clamped_top = src_top.clamp(0, rotated_h as i64);
    let clamped_right = (src_left + src_width).clamp(0, rotated_w as i64);
    let clamped_bottom = (src_top + src_height).clamp(0, rotated_h as i64);

    if clamped_right <= clamped_left || clamped_bottom <= clamped_top {
        return Err(TrimError::OutOfBounds {
            left: src_left,
            top: src_top,
            width: src_width,
            height: src_height,
        });
    }

    Ok(TrimRect {
        left: clamped_left as u32,
        top: clamped_top as u32,
        width: (clamped_right - clamped_left) as u32,
        height: (clamped_bottom - clamped_top) as u32,
        rotation,
    })
}

/// Extract the framed region from the full-resolution source bitmap.
///
/// Rotation and crop run as two separate image operations, in that order.
/// The source buffer is validated up front; hosts hand bitmaps across the
/// boundary and a short buffer must fail as a typed error, not a panic
/// inside the pixel loops.
pub fn trim_bitmap(source: &Bitmap, viewport: &Viewport) -> Result<Bitmap, TrimError> {
    let expected = source.width as usize * source.height as usize * 3;
    if source.pixels.len() != expected {
        return Err(TrimError::InvalidPixelData {
            expected,
            actual: source.pixels.len(),
        });
    }

    let rect = viewport.trim_rect(source.width, source.height)?;
    let rotated = raster::rotate(source, rect.rotation);
    raster::crop(&rotated, rect.left, rect.top, rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::testutil::position_bitmap;

    fn frame() -> Rect {
        Rect::new(125.0, 425.0, 875.0, 1175.0)
    }

    fn viewport(drawable_w: u32, drawable_h: u32) -> Viewport {
        let mut vp = Viewport::new();
        vp.set_frame(frame());
        vp.set_image(drawable_w, drawable_h);
        vp
    }

    #[test]
    fn test_trim_rect_without_downsampling() {
        // 4000x3000 source at cover scale 0.25: the frame sees the central
        // 3000x3000 of the source, starting 500px in
        let vp = viewport(4000, 3000);
        let rect = vp.trim_rect(4000, 3000).unwrap();
        assert_eq!(
            rect,
            TrimRect {
                left: 500,
                top: 0,
                width: 3000,
                height: 3000,
                rotation: 0.0,
            }
        );
    }

    #[test]
    fn test_trim_rect_with_downsampled_drawable() {
        // Same source displayed through a 4x downsampled 1000x750 drawable
        // must produce the same source rectangle
        let vp = viewport(1000, 750);
        let rect = vp.trim_rect(4000, 3000).unwrap();
        assert_eq!(rect.left, 500);
        assert_eq!(rect.top, 0);
        assert_eq!(rect.width, 3000);
        assert_eq!(rect.height, 3000);
    }

    #[test]
    fn test_trim_rect_after_quarter_turn() {
        let mut vp = viewport(4000, 3000);
        vp.rotate_by(90.0);

        // Rotated source is 3000x4000; the square frame sees all of the
        // short axis and the centered middle of the long one
        let rect = vp.trim_rect(4000, 3000).unwrap();
        assert_eq!(rect.rotation, 90.0);
        assert_eq!(rect.left, 0);
        assert_eq!(rect.top, 500);
        assert_eq!(rect.width, 3000);
        assert_eq!(rect.height, 3000);
    }

    #[test]
    fn test_trim_rect_errors_before_setup() {
        let vp = Viewport::new();
        assert_eq!(vp.trim_rect(100, 100), Err(TrimError::NoImage));

        let mut vp = Viewport::new();
        vp.set_image(100, 100);
        assert_eq!(vp.trim_rect(100, 100), Err(TrimError::NotLaidOut));
    }

    #[test]
    fn test_trim_rect_rejects_degenerate_frame() {
        let result = trim_rect(
            &Transform::identity(),
            Rect::new(10.0, 10.0, 10.0, 10.0),
            100.0,
            100.0,
            100,
            100,
            0.0,
        );
        assert_eq!(result, Err(TrimError::DegenerateFrame));
    }

    #[test]
    fn test_trim_rect_rejects_frame_outside_image() {
        // Image sits at the origin, frame is entirely past its right edge
        let result = trim_rect(
            &Transform::identity(),
            Rect::new(200.0, 200.0, 300.0, 300.0),
            100.0,
            100.0,
            100,
            100,
            0.0,
        );
        assert!(matches!(result, Err(TrimError::OutOfBounds { .. })));
    }

    #[test]
    fn test_trim_bitmap_rejects_mismatched_buffer() {
        let mut vp = Viewport::new();
        vp.set_frame(Rect::new(2.0, 2.0, 6.0, 6.0));
        vp.set_image(8, 8);

        // Claims 8x8 but carries far too few bytes
        let source = Bitmap {
            width: 8,
            height: 8,
            pixels: vec![0u8; 30],
        };
        assert_eq!(
            trim_bitmap(&source, &vp),
            Err(TrimError::InvalidPixelData {
                expected: 8 * 8 * 3,
                actual: 30,
            })
        );
    }

    #[test]
    fn test_trim_bitmap_identity_fit() {
        // An 8x8 source in a 4x4 frame at cover scale 0.5 trims to the full
        // image
        let source = position_bitmap(8, 8);
        let mut vp = Viewport::new();
        vp.set_frame(Rect::new(2.0, 2.0, 6.0, 6.0));
        vp.set_image(8, 8);

        let out = trim_bitmap(&source, &vp).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_trim_bitmap_zoomed_reads_focal_quadrant() {
        let source = position_bitmap(8, 8);
        let mut vp = Viewport::new();
        vp.set_frame(Rect::new(2.0, 2.0, 6.0, 6.0));
        vp.set_image(8, 8);

        // Zoom 2x about the frame's top-left corner: the frame now shows
        // the source's top-left quadrant
        vp.on_scale(2.0, 2.0, 2.0);
        let out = trim_bitmap(&source, &vp).unwrap();

        assert_eq!(out.width, 4);
        assert_eq!(out.height, 4);
        assert_eq!(out.pixel(0, 0), source.pixel(0, 0));
        assert_eq!(out.pixel(3, 3), source.pixel(3, 3));
    }

    #[test]
    fn test_trim_bitmap_pan_shifts_window() {
        let source = position_bitmap(8, 8);
        let mut vp = Viewport::new();
        vp.set_frame(Rect::new(2.0, 2.0, 6.0, 6.0));
        vp.set_image(8, 8);
        vp.on_scale(2.0, 2.0, 2.0);

        // Drag the image one display unit left; the window shifts one
        // source pixel right
        vp.on_pan(-1.0, 0.0);
        let out = trim_bitmap(&source, &vp).unwrap();

        assert_eq!(out.width, 4);
        assert_eq!(out.pixel(0, 0), source.pixel(1, 0));
    }

    #[test]
    fn test_trim_bitmap_after_rotation() {
        let source = position_bitmap(4, 2);
        let mut vp = Viewport::new();
        vp.set_frame(Rect::new(0.0, 0.0, 2.0, 2.0));
        vp.set_image(4, 2);
        vp.rotate_by(180.0);

        let out = trim_bitmap(&source, &vp).unwrap();
        assert_eq!(out.width, 2);
        assert_eq!(out.height, 2);

        // The 180-degree rotated source's central 2x2 window
        let rotated = raster::rotate(&source, 180.0);
        assert_eq!(out.pixel(0, 0), rotated.pixel(1, 0));
    }
}
