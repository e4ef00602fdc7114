//! Unsigned LEB128 varints and the small encoders built on them.
//!
//! Decoding never normalises: callers that need byte-exact passthrough
//! keep the original byte range instead of re-encoding a decoded value.

use wasmprep_types::{Limits, PrepareError, Result};

/// Longest encoding that still fits a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Decode an unsigned varint starting at `pos`.
///
/// Returns the value and the position just past its last byte. Bits that
/// do not fit in a `u64` are dropped rather than reported.
pub fn decode_varint(bytes: &[u8], pos: usize) -> Result<(u64, usize)> {
    let mut result = 0u64;
    let mut offset = pos;

    for index in 0..MAX_VARINT_LEN {
        let byte = *bytes
            .get(offset)
            .ok_or(PrepareError::UnexpectedEof { offset })?;
        offset += 1;

        result |= u64::from(byte & 0x7f) << (7 * index);

        if byte & 0x80 == 0 {
            return Ok((result, offset));
        }
    }

    Err(PrepareError::VarintTooLong { offset: pos })
}

/// Append the minimal encoding of `value` to `out`.
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Minimal encoding of `value`.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    write_varint(&mut out, value);
    out
}

/// Append a length-prefixed UTF-8 name.
pub fn write_string(out: &mut Vec<u8>, text: &str) {
    write_varint(out, text.len() as u64);
    out.extend_from_slice(text.as_bytes());
}

/// Append a flags byte, `initial`, and `max` when present.
pub fn write_limits(out: &mut Vec<u8>, limits: &Limits) {
    out.push(limits.flags());
    write_varint(out, limits.initial);
    if let Some(max) = limits.max {
        write_varint(out, max);
    }
}
