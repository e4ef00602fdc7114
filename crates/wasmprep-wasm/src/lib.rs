//! wasmprep as a WASM module for JavaScript hosts.
//!
//! This crate exposes module preparation via `wasm-bindgen`, so an indexer
//! or RPC service written in JavaScript can prepare contract code before
//! handing it to its VM.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { prepare, prepare_base64 } from 'wasmprep-wasm';
//!
//! await init();
//!
//! const result = JSON.parse(prepare_base64(change.codeBase64));
//! // { success: true, wasm: [0, 97, 115, 109, ...], stats: { ... }, ... }
//! ```

use wasm_bindgen::prelude::*;
use wasmprep_types::PrepareOptions;

/// Prepare raw module bytes with the default options.
///
/// Returns a JSON string containing a `PrepareResult`:
/// ```json
/// {
///   "success": true,
///   "wasm": [0, 97, 115, 109, ...],
///   "stats": { "sections": 9, "memory_imports_removed": 1, ... },
///   "input_sha256": "…",
///   "output_sha256": "…"
/// }
/// ```
///
/// On failure, `success` is `false`, `wasm` is `null`, and `error` holds
/// a stable `code` plus a human-readable `message`.
#[wasm_bindgen]
pub fn prepare(wasm: &[u8]) -> String {
    wasmprep_rewrite::prepare_to_result(wasm, &PrepareOptions::default()).to_json()
}

/// Prepare raw module bytes with options given as JSON.
///
/// Missing option fields take their defaults. Malformed options produce a
/// failure result with code `invalid_options`.
#[wasm_bindgen]
pub fn prepare_with_options(wasm: &[u8], options_json: &str) -> String {
    match PrepareOptions::from_json(options_json) {
        Ok(options) => wasmprep_rewrite::prepare_to_result(wasm, &options).to_json(),
        Err(e) => invalid_options(&e),
    }
}

/// Prepare base64-encoded module bytes, as stored by chain indexers.
#[wasm_bindgen]
pub fn prepare_base64(code: &str) -> String {
    wasmprep_rewrite::prepare_base64_to_result(code, &PrepareOptions::default()).to_json()
}

/// Return the default options as JSON, for hosts that want to tweak them.
#[wasm_bindgen]
pub fn default_options() -> String {
    PrepareOptions::default().to_json()
}

/// Return the wasmprep version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn invalid_options(err: &serde_json::Error) -> String {
    serde_json::json!({
        "success": false,
        "wasm": null,
        "error": { "code": "invalid_options", "message": err.to_string() },
    })
    .to_string()
}
