//! Image decoding WASM bindings.
//!
//! This module exposes the imagetrim-core image loading functions to
//! JavaScript: decoding with EXIF orientation applied, plus the resizing
//! used to produce display-sized previews of large sources.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG or PNG image from bytes
//! - [`get_orientation`] - Read the raw EXIF orientation value from bytes
//! - [`resize`] - Resize an image to exact dimensions
//! - [`resize_to_fit`] - Resize to fit within a max edge, preserving aspect ratio
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@imagetrim/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const source = decode_image(bytes);
//!
//! // Downsample for display; trim later maps back to the full source
//! const preview = resize_to_fit(source, 2048, 1);
//! console.log(`Preview: ${preview.width}x${preview.height}`);
//! ```

use crate::types::{filter_from_u8, JsBitmap};
use imagetrim_core::{decode, raster};
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG image from bytes.
///
/// EXIF orientation is applied during decoding, so the returned bitmap is
/// always upright.
///
/// # Arguments
///
/// * `bytes` - The raw image file bytes as a `Uint8Array`
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image format or the
/// file is corrupted or truncated.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the EXIF orientation value (1-8) from image bytes.
///
/// Returns 1 (normal) when no EXIF data is present. Decoding already applies
/// the orientation; this is exposed for hosts that display metadata.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

/// Resize an image to exact dimensions.
///
/// The original aspect ratio is ignored; use [`resize_to_fit`] to preserve
/// it.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Resize algorithm: 0=Nearest (fastest), 1=Bilinear (default), 2=Lanczos3 (best quality)
///
/// # Errors
///
/// Returns an error if width or height is zero.
#[wasm_bindgen]
pub fn resize(
    image: &JsBitmap,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsBitmap, JsValue> {
    let bitmap = image.to_bitmap();
    let filter_type = filter_from_u8(filter);

    raster::resize(&bitmap, width, height, filter_type)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to fit within a maximum edge size, preserving aspect
/// ratio.
///
/// The image is scaled so its longest edge equals `max_edge` pixels. Images
/// already within the limit are returned unchanged (no upscaling).
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `max_edge` - Maximum size for the longest edge in pixels
/// * `filter` - Resize algorithm: 0=Nearest (fastest), 1=Bilinear (default), 2=Lanczos3 (best quality)
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsBitmap,
    max_edge: u32,
    filter: u8,
) -> Result<JsBitmap, JsValue> {
    let bitmap = image.to_bitmap();
    let filter_type = filter_from_u8(filter);

    raster::resize_to_fit(&bitmap, max_edge, filter_type)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
