//! Bitmap rotation.
//!
//! Rotation angles are in degrees, positive = clockwise on screen, matching
//! the transform convention in [`crate::geometry`]. The common case in the
//! trimmer is a multiple of 90 degrees, which is performed as an exact index
//! remap with no resampling. Arbitrary angles fall back to inverse-mapped
//! bilinear sampling on an expanded canvas:
//!
//! ```text
//! src_x = (dst_x - cx) * cos(th) + (dst_y - cy) * sin(th) + src_cx
//! src_y = -(dst_x - cx) * sin(th) + (dst_y - cy) * cos(th) + src_cy
//! ```

use super::Bitmap;

const ANGLE_EPS: f32 = 0.001;

/// Compute the dimensions of the bounding box for a rotated bitmap.
///
/// 90/270-degree rotations swap the dimensions; other angles expand the
/// canvas so the whole rotated image fits.
pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let normalized = degrees.rem_euclid(360.0);

    if normalized < ANGLE_EPS || normalized > 360.0 - ANGLE_EPS {
        return (width, height);
    }
    if (normalized - 90.0).abs() < ANGLE_EPS || (normalized - 270.0).abs() < ANGLE_EPS {
        return (height, width);
    }
    if (normalized - 180.0).abs() < ANGLE_EPS {
        return (width, height);
    }

    let rad = normalized.to_radians();
    let cos = rad.cos().abs();
    let sin = rad.sin().abs();
    let w = width as f32;
    let h = height as f32;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;
    (new_w.max(1), new_h.max(1))
}

/// Rotate a bitmap clockwise by `degrees` about its center.
///
/// Multiples of 90 degrees are lossless pixel remaps. Other angles produce
/// an expanded canvas with bilinear sampling; uncovered corners are black.
pub fn rotate(image: &Bitmap, degrees: f32) -> Bitmap {
    let normalized = degrees.rem_euclid(360.0);

    if normalized < ANGLE_EPS || normalized > 360.0 - ANGLE_EPS {
        return image.clone();
    }
    if (normalized - 90.0).abs() < ANGLE_EPS {
        return remap(image, image.height, image.width, |x, y, src| {
            (y, src.height - 1 - x)
        });
    }
    if (normalized - 180.0).abs() < ANGLE_EPS {
        return remap(image, image.width, image.height, |x, y, src| {
            (src.width - 1 - x, src.height - 1 - y)
        });
    }
    if (normalized - 270.0).abs() < ANGLE_EPS {
        return remap(image, image.height, image.width, |x, y, src| {
            (src.width - 1 - y, x)
        });
    }

    rotate_arbitrary(image, normalized)
}

/// Exact rotation: each destination pixel reads one source pixel.
fn remap(
    src: &Bitmap,
    dst_w: u32,
    dst_h: u32,
    source_of: impl Fn(u32, u32, &Bitmap) -> (u32, u32),
) -> Bitmap {
    let mut pixels = vec![0u8; dst_w as usize * dst_h as usize * 3];
    for y in 0..dst_h {
        for x in 0..dst_w {
            let (sx, sy) = source_of(x, y, src);
            let p = src.pixel(sx, sy);
            let idx = (y as usize * dst_w as usize + x as usize) * 3;
            pixels[idx] = p[0];
            pixels[idx + 1] = p[1];
            pixels[idx + 2] = p[2];
        }
    }
    Bitmap {
        width: dst_w,
        height: dst_h,
        pixels,
    }
}

fn rotate_arbitrary(image: &Bitmap, degrees: f32) -> Bitmap {
    let (dst_w, dst_h) = rotated_bounds(image.width, image.height, degrees);

    let rad = degrees.to_radians();
    let cos = rad.cos();
    let sin = rad.sin();

    let src_cx = image.width as f32 / 2.0;
    let src_cy = image.height as f32 / 2.0;
    let dst_cx = dst_w as f32 / 2.0;
    let dst_cy = dst_h as f32 / 2.0;

    let mut pixels = vec![0u8; dst_w as usize * dst_h as usize * 3];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f32 - dst_cx;
            let dy = dst_y as f32 - dst_cy;

            // Inverse of the clockwise forward rotation
            let src_x = dx * cos + dy * sin + src_cx;
            let src_y = -dx * sin + dy * cos + src_cy;

            let pixel = sample_bilinear(image, src_x, src_y);
            let idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 3;
            pixels[idx] = pixel[0];
            pixels[idx + 1] = pixel[1];
            pixels[idx + 2] = pixel[2];
        }
    }

    Bitmap {
        width: dst_w,
        height: dst_h,
        pixels,
    }
}

/// Sample a pixel with bilinear interpolation; out-of-bounds reads are
/// black.
fn sample_bilinear(image: &Bitmap, x: f32, y: f32) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    if x < 0.0 || x >= (w - 1) as f32 || y < 0.0 || y >= (h - 1) as f32 {
        return [0, 0, 0];
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x0 + 1, y0);
    let p01 = image.pixel(x0, y0 + 1);
    let p11 = image.pixel(x0 + 1, y0 + 1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] as f32 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f32 * fx * (1.0 - fy)
            + p01[i] as f32 * (1.0 - fx) * fy
            + p11[i] as f32 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: rotated bounds are never zero.
        #[test]
        fn prop_bounds_never_zero(
            w in 1u32..200,
            h in 1u32..200,
            deg in -720.0f32..720.0,
        ) {
            let (bw, bh) = rotated_bounds(w, h, deg);
            prop_assert!(bw > 0);
            prop_assert!(bh > 0);
        }

        /// Property: opposite angles produce the same bounds, within one
        /// pixel of rounding.
        #[test]
        fn prop_bounds_symmetric(
            w in 1u32..200,
            h in 1u32..200,
            deg in 0.0f32..180.0,
        ) {
            let (pw, ph) = rotated_bounds(w, h, deg);
            let (nw, nh) = rotated_bounds(w, h, -deg);
            prop_assert!((pw as i64 - nw as i64).abs() <= 1);
            prop_assert!((ph as i64 - nh as i64).abs() <= 1);
        }
    }
}
