//! Memory section rewriting.
//!
//! A prepared module declares no memories of its own. The declared count
//! is checked so a real local memory is never dropped silently.

use log::{debug, warn};
use wasmprep_reader::RawSection;
use wasmprep_types::{LocalMemoryPolicy, PrepareError, PrepareOptions, Result};

use crate::stats::RewriteStats;

/// Payload of a memory section declaring zero memories.
pub const EMPTY_MEMORY_PAYLOAD: &[u8] = &[0x00];

/// Build the replacement payload for a memory section.
pub fn rewrite_memory(
    section: &RawSection<'_>,
    options: &PrepareOptions,
    stats: &mut RewriteStats,
) -> Result<Vec<u8>> {
    let count = if section.payload_len() == 0 {
        0
    } else {
        section.reader().read_varint()?
    };

    if count > 0 {
        match options.local_memory {
            LocalMemoryPolicy::Reject => {
                return Err(PrepareError::UnexpectedLocalMemory { count });
            }
            LocalMemoryPolicy::Discard => {
                warn!("discarding {count} local memory declaration(s)");
                stats.local_memories_discarded =
                    stats.local_memories_discarded.saturating_add(count);
            }
        }
    } else {
        debug!("memory section declares no memories");
    }

    Ok(EMPTY_MEMORY_PAYLOAD.to_vec())
}
