//! Imagetrim WASM - WebAssembly bindings for Imagetrim
//!
//! This crate exposes the imagetrim-core crop engine to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `session` - The interactive trimming session (layout, gestures, viewport, trim)
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (JPEG/PNG, orientation, resize)
//! - `encode` - Image encoding bindings (JPEG export)
//!
//! # Usage
//!
//! ```typescript
//! import init, { TrimSession, decode_image, encode_jpeg } from '@imagetrim/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const source = decode_image(bytes);
//!
//! const session = new TrimSession(null);
//! session.layout(canvas.width, canvas.height);
//! session.set_image(source.width, source.height);
//!
//! // ...drive pointer/scale events, then:
//! const jpeg = session.trim_to_jpeg(source);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod types;

// Re-export public types
pub use decode::{decode_image, get_orientation, resize, resize_to_fit};
pub use encode::encode_jpeg;
pub use session::TrimSession;
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
