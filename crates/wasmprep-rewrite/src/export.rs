//! Export section rewriting: memory exports are dropped.

use log::debug;
use wasmprep_reader::{write_varint, RawSection};
use wasmprep_types::{ExportKind, Result};

use crate::stats::RewriteStats;

/// Build the replacement payload for an export section.
pub fn rewrite_exports(section: &RawSection<'_>, stats: &mut RewriteStats) -> Result<Vec<u8>> {
    let mut reader = section.reader();
    let count = reader.read_varint()?;
    debug!("export section: {count} entries");

    let mut kept: Vec<&[u8]> = Vec::new();
    for _ in 0..count {
        let start = reader.pos();
        let name = reader.read_string()?;
        let kind = ExportKind(reader.read_u8()?);
        let index = reader.read_varint()?;

        if kind.is_memory() {
            debug!("dropping memory export {name:?} (memory {index})");
            stats.memory_exports_removed += 1;
        } else {
            kept.push(reader.slice_from(start));
        }
    }
    stats.exports_kept += kept.len();

    let mut payload = Vec::with_capacity(section.payload_len());
    write_varint(&mut payload, kept.len() as u64);
    for entry in kept {
        payload.extend_from_slice(entry);
    }
    Ok(payload)
}
