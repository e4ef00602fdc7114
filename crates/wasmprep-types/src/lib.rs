//! Shared types for wasmprep.
//!
//! This crate defines the error type, the section and import-kind
//! vocabulary of the module format, size limits, and the options that
//! steer a rewrite. Every other wasmprep crate builds on it.

mod error;
mod options;
mod section;

pub use error::PrepareError;
pub use options::{LocalMemoryPolicy, PrepareOptions};
pub use section::{section_name, ExportKind, ImportKind, Limits, SectionId};

/// Result type used throughout wasmprep.
pub type Result<T> = std::result::Result<T, PrepareError>;
