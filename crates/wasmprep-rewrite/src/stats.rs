//! Counters collected while rewriting a module.

use serde::{Deserialize, Serialize};

/// What a rewrite changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStats {
    /// Top-level sections visited.
    pub sections: usize,
    /// Import entries copied through unchanged.
    pub imports_kept: usize,
    /// Memory imports dropped.
    pub memory_imports_removed: usize,
    /// Export entries copied through unchanged.
    pub exports_kept: usize,
    /// Memory exports dropped.
    pub memory_exports_removed: usize,
    /// Local memory declarations dropped under `LocalMemoryPolicy::Discard`.
    pub local_memories_discarded: u64,
    /// Whether the canonical memory import was written. False when the
    /// module has no import section.
    pub canonical_import_injected: bool,
}
