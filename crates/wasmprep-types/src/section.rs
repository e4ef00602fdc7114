//! Module-format vocabulary: section ids, import/export kinds, limits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PrepareError;

/// Identifier byte of a top-level section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId(pub u8);

impl SectionId {
    pub const CUSTOM: Self = Self(0);
    pub const TYPE: Self = Self(1);
    pub const IMPORT: Self = Self(2);
    pub const FUNCTION: Self = Self(3);
    pub const TABLE: Self = Self(4);
    pub const MEMORY: Self = Self(5);
    pub const GLOBAL: Self = Self(6);
    pub const EXPORT: Self = Self(7);
    pub const START: Self = Self(8);
    pub const ELEMENT: Self = Self(9);
    pub const CODE: Self = Self(10);
    pub const DATA: Self = Self(11);
    pub const DATA_COUNT: Self = Self(12);
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", section_name(*self), self.0)
    }
}

/// Human-readable name of a section id, for tracing.
pub fn section_name(id: SectionId) -> &'static str {
    match id.0 {
        0 => "custom",
        1 => "type",
        2 => "import",
        3 => "function",
        4 => "table",
        5 => "memory",
        6 => "global",
        7 => "export",
        8 => "start",
        9 => "element",
        10 => "code",
        11 => "data",
        12 => "datacount",
        _ => "unknown",
    }
}

/// Kind byte of an import entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImportKind {
    Function = 0,
    Table = 1,
    Memory = 2,
    Global = 3,
}

impl ImportKind {
    /// Decode a kind byte, rejecting anything outside the known set.
    pub fn from_byte(byte: u8) -> Result<Self, PrepareError> {
        match byte {
            0 => Ok(ImportKind::Function),
            1 => Ok(ImportKind::Table),
            2 => Ok(ImportKind::Memory),
            3 => Ok(ImportKind::Global),
            other => Err(PrepareError::InvalidImportKind(other)),
        }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Kind byte of an export entry.
///
/// Only [`ExportKind::MEMORY`] is interpreted; every other value is carried
/// through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportKind(pub u8);

impl ExportKind {
    pub const FUNCTION: Self = Self(0);
    pub const MEMORY: Self = Self(2);

    pub fn is_memory(self) -> bool {
        self == Self::MEMORY
    }
}

/// Size constraint of a memory or table, in pages or elements.
///
/// Encoded as a flags byte (bit 0 = has max), then `initial`, then `max`
/// when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub initial: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

impl Limits {
    pub fn new(initial: u64, max: Option<u64>) -> Self {
        Self { initial, max }
    }

    pub fn has_max(&self) -> bool {
        self.max.is_some()
    }

    /// The flags byte that leads the encoded form.
    pub fn flags(&self) -> u8 {
        u8::from(self.has_max())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(1, None)
    }
}
