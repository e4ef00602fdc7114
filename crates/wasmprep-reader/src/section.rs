//! Forward-only scan over the top-level sections of a module.

use log::trace;
use wasmprep_types::{section_name, PrepareError, Result, SectionId};

use crate::leb::decode_varint;
use crate::reader::Reader;

/// One top-level section, as positions into the module buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSection<'a> {
    pub id: SectionId,
    /// Position of the id byte.
    pub start: usize,
    /// First payload byte (just past the length prefix).
    pub payload_start: usize,
    /// One past the last payload byte; the next section starts here.
    pub payload_end: usize,
    module: &'a [u8],
}

impl<'a> RawSection<'a> {
    /// The payload, without id byte or length prefix.
    pub fn payload(&self) -> &'a [u8] {
        &self.module[self.payload_start..self.payload_end]
    }

    /// The full original byte range: id, length prefix and payload.
    pub fn bytes(&self) -> &'a [u8] {
        &self.module[self.start..self.payload_end]
    }

    pub fn payload_len(&self) -> usize {
        self.payload_end - self.payload_start
    }

    /// A reader bounded to the payload, reporting module-absolute offsets.
    pub fn reader(&self) -> Reader<'a> {
        Reader::with_range(self.module, self.payload_start, self.payload_end)
    }
}

/// Iterator over the sections of a module, starting at a given cursor.
///
/// The scan is a single forward pass and cannot be restarted. It stops at
/// the end of the buffer or after the first error.
#[derive(Debug, Clone)]
pub struct SectionScanner<'a> {
    module: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> SectionScanner<'a> {
    /// Scan `module` from `pos`, normally just past the header.
    pub fn new(module: &'a [u8], pos: usize) -> Self {
        Self {
            module,
            pos,
            failed: false,
        }
    }

    fn next_section(&mut self) -> Result<RawSection<'a>> {
        let start = self.pos;
        let id = SectionId(self.module[start]);
        let (len, payload_start) = decode_varint(self.module, start + 1)?;
        let payload_end = usize::try_from(len)
            .ok()
            .and_then(|len| payload_start.checked_add(len))
            .filter(|end| *end <= self.module.len())
            .ok_or(PrepareError::UnexpectedEof {
                offset: self.module.len(),
            })?;

        trace!(
            "section {} at {:#x}, {} payload bytes",
            section_name(id),
            start,
            payload_end - payload_start
        );

        self.pos = payload_end;
        Ok(RawSection {
            id,
            start,
            payload_start,
            payload_end,
            module: self.module,
        })
    }
}

impl<'a> Iterator for SectionScanner<'a> {
    type Item = Result<RawSection<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.module.len() {
            return None;
        }
        let section = self.next_section();
        self.failed = section.is_err();
        Some(section)
    }
}
