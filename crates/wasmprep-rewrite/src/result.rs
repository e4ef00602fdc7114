//! Structured results for hosts that talk JSON.
//!
//! Upstream stores usually hand over contract code base64-encoded, so
//! there is an entry point that decodes it first.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use wasmprep_types::{PrepareError, PrepareOptions};

use crate::assembler::prepare;
use crate::stats::RewriteStats;

/// Outcome of preparing one module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareResult {
    pub success: bool,
    /// Prepared module bytes, `None` on failure.
    pub wasm: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<RewriteStats>,
    /// Hex SHA-256 of the input module, once it was decoded.
    pub input_sha256: Option<String>,
    /// Hex SHA-256 of the prepared module.
    pub output_sha256: Option<String>,
}

/// A failure in a form hosts can match on without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable identifier, e.g. `invalid_import_kind`.
    pub code: String,
    pub message: String,
}

impl From<&PrepareError> for ErrorInfo {
    fn from(err: &PrepareError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl PrepareResult {
    fn failure(err: &PrepareError, input_sha256: Option<String>) -> Self {
        Self {
            success: false,
            wasm: None,
            error: Some(err.into()),
            stats: None,
            input_sha256,
            output_sha256: None,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"wasm":null,"error":{{"code":"serialization","message":"{e}"}}}}"#
            )
        })
    }
}

/// Prepare `wasm` and capture the outcome as a [`PrepareResult`].
pub fn prepare_to_result(wasm: &[u8], options: &PrepareOptions) -> PrepareResult {
    let input_sha256 = Some(sha256_hex(wasm));
    match prepare(wasm, options) {
        Ok(prepared) => PrepareResult {
            success: true,
            output_sha256: Some(sha256_hex(&prepared.wasm)),
            wasm: Some(prepared.wasm),
            error: None,
            stats: Some(prepared.stats),
            input_sha256,
        },
        Err(err) => PrepareResult::failure(&err, input_sha256),
    }
}

/// Decode base64 module bytes, then prepare them.
pub fn prepare_base64_to_result(code: &str, options: &PrepareOptions) -> PrepareResult {
    match decode_base64(code) {
        Ok(wasm) => prepare_to_result(&wasm, options),
        Err(err) => PrepareResult::failure(&err, None),
    }
}

/// Decode standard base64, ignoring surrounding whitespace.
pub fn decode_base64(code: &str) -> Result<Vec<u8>, PrepareError> {
    general_purpose::STANDARD
        .decode(code.trim())
        .map_err(|e| PrepareError::InvalidEncoding(e.to_string()))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
