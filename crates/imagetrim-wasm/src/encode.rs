//! Image encoding WASM bindings.
//!
//! This module exposes the imagetrim-core JPEG encoding function to
//! JavaScript, so a trimmed bitmap can be written back out as a file.
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg } from '@imagetrim/wasm';
//!
//! const trimmed = session.trim(source);
//! const jpegBytes = encode_jpeg(trimmed, 100);
//!
//! const writable = await fileHandle.createWritable();
//! await writable.write(new Blob([jpegBytes], { type: 'image/jpeg' }));
//! await writable.close();
//! ```

use crate::types::JsBitmap;
use imagetrim_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a bitmap to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The bitmap to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest; the trimmer
///   default is 100)
///
/// # Errors
///
/// Returns an error if the bitmap has zero dimensions or its pixel buffer
/// does not match width * height * 3.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsBitmap, quality: u8) -> Result<Vec<u8>, JsValue> {
    let bitmap = image.to_bitmap();
    encode::encode_jpeg(&bitmap, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}
