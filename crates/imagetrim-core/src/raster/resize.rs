//! Bitmap resizing for display downsampling.
//!
//! Hosts downsample large sources before display to stay within texture
//! limits; the trim extractor later maps display coordinates back to the
//! full-resolution source. Resizing uses the `image` crate's algorithms.

use super::{Bitmap, FilterType};
use crate::trim::TrimError;

/// Resize a bitmap to exact dimensions.
pub fn resize(
    image: &Bitmap,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Bitmap, TrimError> {
    if width == 0 || height == 0 {
        return Err(TrimError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb = image.to_rgb_image().ok_or(TrimError::InvalidDimensions {
        width: image.width,
        height: image.height,
    })?;
    let resized = image::imageops::resize(&rgb, width, height, filter.to_image_filter());
    Ok(Bitmap::from_rgb_image(resized))
}

/// Resize a bitmap so its longest edge is at most `max_edge`, preserving
/// aspect ratio. Bitmaps that already fit are returned unchanged.
pub fn resize_to_fit(
    image: &Bitmap,
    max_edge: u32,
    filter: FilterType,
) -> Result<Bitmap, TrimError> {
    if max_edge == 0 {
        return Err(TrimError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (width, height) = if image.width >= image.height {
        let scale = max_edge as f32 / image.width as f32;
        (max_edge, ((image.height as f32 * scale) as u32).max(1))
    } else {
        let scale = max_edge as f32 / image.height as f32;
        (((image.width as f32 * scale) as u32).max(1), max_edge)
    };

    resize(image, width, height, filter)
}
