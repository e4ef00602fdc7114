//! wasmprep reader: decodes the low-level pieces of a module binary.
//!
//! ```text
//! bytes → header check → SectionScanner → RawSection { id, payload }
//!                                  └─ Reader: varint / name / limits
//! ```

pub mod header;
pub mod leb;
pub mod reader;
pub mod section;

pub use header::{check_header, HEADER_LEN, WASM_MAGIC, WASM_VERSION};
pub use leb::{decode_varint, encode_varint, write_limits, write_string, write_varint};
pub use reader::Reader;
pub use section::{RawSection, SectionScanner};
