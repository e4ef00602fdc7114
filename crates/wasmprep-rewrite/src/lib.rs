//! wasmprep rewriter: prepares a module for a host that owns linear memory.
//!
//! # Architecture
//!
//! The host supplies the module's memory itself, so a prepared module
//! must never bring its own. [`prepare`] walks the sections once and:
//!
//! - **import (2)**: drops every memory import and appends the canonical
//!   `env.memory` import (one initial page, no maximum by default)
//! - **memory (5)**: replaces the section with one declaring no memories
//! - **export (7)**: drops every memory export
//!
//! Every other section is copied byte-for-byte, and kept import/export
//! entries are copied as their original byte ranges, never re-encoded.

pub mod assembler;
pub mod export;
pub mod import;
pub mod memory;
pub mod result;
pub mod stats;

pub use assembler::{prepare, rewrite, Prepared};
pub use result::{prepare_base64_to_result, prepare_to_result, ErrorInfo, PrepareResult};
pub use stats::RewriteStats;
pub use wasmprep_types::{LocalMemoryPolicy, PrepareError, PrepareOptions};
