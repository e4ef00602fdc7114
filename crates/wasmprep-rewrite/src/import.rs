//! Import section rewriting.
//!
//! Memory imports are dropped and the canonical memory import is appended
//! after the surviving entries. Surviving entries keep their original
//! bytes.

use log::debug;
use wasmprep_reader::{write_limits, write_string, write_varint, RawSection, Reader};
use wasmprep_types::{ImportKind, PrepareOptions, Result};

use crate::stats::RewriteStats;

/// Build the replacement payload for an import section.
pub fn rewrite_imports(
    section: &RawSection<'_>,
    options: &PrepareOptions,
    stats: &mut RewriteStats,
) -> Result<Vec<u8>> {
    let mut reader = section.reader();
    let count = reader.read_varint()?;
    debug!("import section: {count} entries");

    let mut kept: Vec<&[u8]> = Vec::new();
    for _ in 0..count {
        let start = reader.pos();
        let module = reader.read_string()?;
        let field = reader.read_string()?;
        let kind = ImportKind::from_byte(reader.read_u8()?)?;
        skip_descriptor(&mut reader, kind)?;

        if kind == ImportKind::Memory {
            debug!("dropping memory import {module}.{field}");
            stats.memory_imports_removed += 1;
        } else {
            debug!("keeping {kind:?} import {module}.{field}");
            kept.push(reader.slice_from(start));
        }
    }
    stats.imports_kept += kept.len();

    let canonical = canonical_memory_import(options);
    let mut payload = Vec::with_capacity(section.payload_len() + canonical.len());
    write_varint(&mut payload, kept.len() as u64 + 1);
    for entry in kept {
        payload.extend_from_slice(entry);
    }
    payload.extend_from_slice(&canonical);
    stats.canonical_import_injected = true;

    Ok(payload)
}

/// Encoded import entry for the host-supplied memory.
pub fn canonical_memory_import(options: &PrepareOptions) -> Vec<u8> {
    let mut entry = Vec::new();
    write_string(&mut entry, &options.import_module);
    write_string(&mut entry, &options.import_field);
    entry.push(ImportKind::Memory.as_byte());
    write_limits(&mut entry, &options.memory);
    entry
}

fn skip_descriptor(reader: &mut Reader<'_>, kind: ImportKind) -> Result<()> {
    match kind {
        ImportKind::Function => {
            reader.read_varint()?;
        }
        ImportKind::Table => {
            reader.skip(1)?; // element type
            reader.read_limits()?;
        }
        ImportKind::Memory => {
            reader.read_limits()?;
        }
        ImportKind::Global => {
            reader.skip(2)?; // value type, mutability
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasmprep_types::Limits;

    #[test]
    fn test_default_canonical_import_bytes() {
        let entry = canonical_memory_import(&PrepareOptions::default());
        assert_eq!(entry, b"\x03env\x06memory\x02\x00\x01");
    }

    #[test]
    fn test_configured_canonical_import_bytes() {
        let options = PrepareOptions {
            import_module: "host".to_string(),
            import_field: "mem".to_string(),
            memory: Limits::new(2, Some(16)),
            ..PrepareOptions::default()
        };
        let entry = canonical_memory_import(&options);
        assert_eq!(entry, b"\x04host\x03mem\x02\x01\x02\x10");
    }
}
