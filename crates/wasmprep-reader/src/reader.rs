//! Cursor over a byte range of a module.
//!
//! A [`Reader`] is owned by exactly one call frame. Every read advances
//! its position; nothing else shares it. Offsets in errors are absolute
//! positions in the underlying buffer, so a reader over a section payload
//! still reports where in the module a read failed.

use std::borrow::Cow;

use wasmprep_types::{Limits, PrepareError, Result};

use crate::leb::decode_varint;

#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The buffer the range lives in.
    bytes: &'a [u8],
    /// Current absolute position.
    pos: usize,
    /// Exclusive absolute end of the readable range.
    end: usize,
}

impl<'a> Reader<'a> {
    /// Read the whole of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            end: bytes.len(),
        }
    }

    /// Read `bytes[start..end]`, reporting absolute offsets.
    ///
    /// `end` is clamped to the buffer length.
    pub fn with_range(bytes: &'a [u8], start: usize, end: usize) -> Self {
        let end = end.min(bytes.len());
        Self {
            bytes,
            pos: start.min(end),
            end,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.end
    }

    /// The raw bytes between `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        &self.bytes[start.min(self.pos)..self.pos]
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        if self.pos >= self.end {
            return Err(PrepareError::UnexpectedEof { offset: self.pos });
        }
        let byte = self.bytes[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, next) = decode_varint(&self.bytes[..self.end], self.pos)?;
        self.pos = next;
        Ok(value)
    }

    /// Take the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let stop = self
            .pos
            .checked_add(len)
            .filter(|stop| *stop <= self.end)
            .ok_or(PrepareError::UnexpectedEof { offset: self.end })?;
        let slice = &self.bytes[self.pos..stop];
        self.pos = stop;
        Ok(slice)
    }

    /// Skip `len` bytes without looking at them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// A varint length followed by that many bytes of UTF-8.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; names are only
    /// inspected for tracing and entries are always copied raw.
    pub fn read_string(&mut self) -> Result<Cow<'a, str>> {
        let len = self.read_varint()?;
        let len = usize::try_from(len).map_err(|_| PrepareError::UnexpectedEof { offset: self.end })?;
        let raw = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(raw))
    }

    /// A flags byte, `initial`, then `max` when bit 0 of the flags is set.
    pub fn read_limits(&mut self) -> Result<Limits> {
        let flags = self.read_u8()?;
        let initial = self.read_varint()?;
        let max = if flags & 0x01 != 0 {
            Some(self.read_varint()?)
        } else {
            None
        };
        Ok(Limits { initial, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_string() {
        let mut r = Reader::new(b"\x03env\x06memory");
        assert_eq!(r.read_string().unwrap(), "env");
        assert_eq!(r.pos(), 4);
        assert_eq!(r.read_string().unwrap(), "memory");
        assert!(r.is_empty());
    }

    #[test]
    fn test_read_string_lossy() {
        let mut r = Reader::new(&[0x02, 0xff, b'a']);
        assert_eq!(r.read_string().unwrap(), "\u{fffd}a");
    }

    #[test]
    fn test_read_limits() {
        let mut r = Reader::new(&[0x00, 0x01, 0x01, 0x02, 0x0a]);
        assert_eq!(r.read_limits().unwrap(), Limits::new(1, None));
        assert_eq!(r.read_limits().unwrap(), Limits::new(2, Some(10)));
        assert!(r.is_empty());
    }

    #[test]
    fn test_limits_flags_only_bit_zero_matters() {
        // 0x03 is a shared memory flag set; bit 0 still means "has max".
        let mut r = Reader::new(&[0x03, 0x01, 0x04]);
        assert_eq!(r.read_limits().unwrap(), Limits::new(1, Some(4)));
    }

    #[test]
    fn test_range_reports_absolute_offsets() {
        let bytes = [0xaa, 0xaa, 0x05, b'a'];
        let mut r = Reader::with_range(&bytes, 2, 4);
        assert_eq!(
            r.read_string(),
            Err(PrepareError::UnexpectedEof { offset: 4 })
        );
    }

    #[test]
    fn test_range_hides_bytes_past_end() {
        let bytes = [0x80, 0x01];
        let mut r = Reader::with_range(&bytes, 0, 1);
        assert_eq!(
            r.read_varint(),
            Err(PrepareError::UnexpectedEof { offset: 1 })
        );
    }

    #[test]
    fn test_slice_from() {
        let mut r = Reader::new(b"\x01a\x07");
        let start = r.pos();
        r.read_string().unwrap();
        r.read_u8().unwrap();
        assert_eq!(r.slice_from(start), b"\x01a\x07");
    }

    #[test]
    fn test_read_u8_eof() {
        let mut r = Reader::new(&[]);
        assert_eq!(r.read_u8(), Err(PrepareError::UnexpectedEof { offset: 0 }));
    }
}
