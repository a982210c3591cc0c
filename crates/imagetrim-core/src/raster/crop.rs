//! Pixel-rectangle cropping.

use super::Bitmap;
use crate::trim::TrimError;

/// Cut a pixel rectangle out of a bitmap.
///
/// The input buffer must match its stated dimensions; the rectangle is
/// clamped to the bitmap bounds, and if nothing remains after clamping the
/// crop is rejected with [`TrimError::OutOfBounds`]. Pixel data is copied
/// row by row.
pub fn crop(
    image: &Bitmap,
    left: u32,
    top: u32,
    width: u32,
    height: u32,
) -> Result<Bitmap, TrimError> {
    let expected = image.width as usize * image.height as usize * 3;
    if image.pixels.len() != expected {
        return Err(TrimError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let right = left.saturating_add(width).min(image.width);
    let bottom = top.saturating_add(height).min(image.height);

    if left >= right || top >= bottom {
        return Err(TrimError::OutOfBounds {
            left: left as i64,
            top: top as i64,
            width: width as i64,
            height: height as i64,
        });
    }

    let out_width = right - left;
    let out_height = bottom - top;
    let row_bytes = out_width as usize * 3;
    let mut pixels = vec![0u8; out_width as usize * out_height as usize * 3];

    for y in 0..out_height as usize {
        let src_start = ((top as usize + y) * image.width as usize + left as usize) * 3;
        let dst_start = y * row_bytes;
        pixels[dst_start..dst_start + row_bytes]
            .copy_from_slice(&image.pixels[src_start..src_start + row_bytes]);
    }

    Ok(Bitmap {
        width: out_width,
        height: out_height,
        pixels,
    })
}
