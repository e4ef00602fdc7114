//! Error types for module preparation.

use thiserror::Error;

/// Everything that can stop a module from being prepared.
///
/// All variants are fatal for a single rewrite: no partial output is
/// produced and the caller must discard the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    /// The first four bytes are not `\0asm`.
    #[error("invalid magic number: {found:02x?}")]
    InvalidMagic { found: Vec<u8> },

    /// The version field is not the single supported value.
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u32),

    /// An import entry carries a kind byte outside `0..=3`.
    #[error("invalid import kind: {0}")]
    InvalidImportKind(u8),

    /// The memory section declares module-owned memories.
    #[error("memory section declares {count} local memories, only the imported memory is allowed")]
    UnexpectedLocalMemory { count: u64 },

    /// A read ran past the end of the buffer (or of a section payload).
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A varint kept its continuation bit set past the widest legal encoding.
    #[error("varint too long at offset {offset}")]
    VarintTooLong { offset: usize },

    /// The module bytes arrived in a transport encoding that could not be decoded.
    #[error("invalid transport encoding: {0}")]
    InvalidEncoding(String),

    /// The rewritten module failed validation.
    #[error("output validation failed: {0}")]
    ValidationFailed(String),
}

impl PrepareError {
    /// Stable machine-readable identifier, used in JSON results.
    pub fn code(&self) -> &'static str {
        match self {
            PrepareError::InvalidMagic { .. } => "invalid_magic",
            PrepareError::UnsupportedVersion(_) => "unsupported_version",
            PrepareError::InvalidImportKind(_) => "invalid_import_kind",
            PrepareError::UnexpectedLocalMemory { .. } => "unexpected_local_memory",
            PrepareError::UnexpectedEof { .. } => "unexpected_eof",
            PrepareError::VarintTooLong { .. } => "varint_too_long",
            PrepareError::InvalidEncoding(_) => "invalid_encoding",
            PrepareError::ValidationFailed(_) => "validation_failed",
        }
    }
}
