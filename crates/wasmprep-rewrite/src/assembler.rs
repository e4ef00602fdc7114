//! Module assembler.
//!
//! Drives the section scanner and stitches the output together:
//! 1. Check and copy the 8-byte header
//! 2. Dispatch import (2), memory (5) and export (7) sections to their
//!    rewriters and re-frame the result as `[id, varint(len), payload]`
//! 3. Copy every other section's original bytes unchanged
//! 4. Optionally validate the result with `wasmparser`
//!
//! Sections are never reordered, inserted or removed.

use log::{debug, warn};
use wasmprep_reader::{check_header, write_varint, SectionScanner, HEADER_LEN};
use wasmprep_types::{PrepareError, PrepareOptions, Result, SectionId};

use crate::stats::RewriteStats;
use crate::{export, import, memory};

/// A rewritten module and what changed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    pub wasm: Vec<u8>,
    pub stats: RewriteStats,
}

/// Rewrite `wasm` with the default options.
///
/// This is the core contract: module bytes in, prepared module bytes out.
pub fn rewrite(wasm: &[u8]) -> Result<Vec<u8>> {
    prepare(wasm, &PrepareOptions::default()).map(|prepared| prepared.wasm)
}

/// Rewrite `wasm` so that its only memory is the host-supplied import.
pub fn prepare(wasm: &[u8], options: &PrepareOptions) -> Result<Prepared> {
    check_header(wasm)?;

    let mut out = Vec::with_capacity(wasm.len() + 16);
    out.extend_from_slice(&wasm[..HEADER_LEN]);

    let mut stats = RewriteStats::default();
    for section in SectionScanner::new(wasm, HEADER_LEN) {
        let section = section?;
        stats.sections += 1;

        let payload = match section.id {
            SectionId::IMPORT => import::rewrite_imports(&section, options, &mut stats)?,
            SectionId::MEMORY => memory::rewrite_memory(&section, options, &mut stats)?,
            SectionId::EXPORT => export::rewrite_exports(&section, &mut stats)?,
            _ => {
                out.extend_from_slice(section.bytes());
                continue;
            }
        };
        debug!(
            "rewrote section {}: {} -> {} payload bytes",
            section.id,
            section.payload_len(),
            payload.len()
        );
        emit_section(&mut out, section.id, &payload);
    }

    if !stats.canonical_import_injected {
        warn!("module has no import section; no memory import was added");
    }

    if options.validate_output {
        wasmparser::validate(&out).map_err(|e| PrepareError::ValidationFailed(format!("{e}")))?;
    }

    debug!("prepared module: {} -> {} bytes", wasm.len(), out.len());
    Ok(Prepared { wasm: out, stats })
}

/// Append a section with a freshly derived length prefix.
fn emit_section(out: &mut Vec<u8>, id: SectionId, payload: &[u8]) {
    out.push(id.0);
    write_varint(out, payload.len() as u64);
    out.extend_from_slice(payload);
}
