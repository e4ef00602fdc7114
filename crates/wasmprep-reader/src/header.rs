//! The fixed 8-byte module header.

use wasmprep_types::{PrepareError, Result};

/// `\0asm`.
pub const WASM_MAGIC: &[u8; 4] = b"\0asm";
/// The only accepted version.
pub const WASM_VERSION: u32 = 1;
/// Magic plus little-endian version.
pub const HEADER_LEN: usize = 8;

/// Check magic and version.
///
/// A buffer shorter than four bytes is reported as a bad magic number;
/// one with a valid magic but no room for the version is an early EOF.
pub fn check_header(bytes: &[u8]) -> Result<()> {
    let magic = &bytes[..bytes.len().min(4)];
    if magic != WASM_MAGIC {
        return Err(PrepareError::InvalidMagic {
            found: magic.to_vec(),
        });
    }

    let version: [u8; 4] = bytes
        .get(4..HEADER_LEN)
        .and_then(|v| v.try_into().ok())
        .ok_or(PrepareError::UnexpectedEof {
            offset: bytes.len(),
        })?;
    let version = u32::from_le_bytes(version);
    if version != WASM_VERSION {
        return Err(PrepareError::UnsupportedVersion(version));
    }

    Ok(())
}
