//! Presence bitmap writer — a reimplementation of the external
//! `IndexedDISI` primitive (§1: "the presence-bitmap writer ... consumed
//! as a black box returning a *jump-table entry count* after serializing
//! a document-id set").
//!
//! Documents are grouped into fixed `1 << 16`-doc blocks. Each block is
//! serialized as whichever of three representations is smallest:
//!
//! - **ALL** — every doc in the block has a value; no data bytes.
//! - **DENSE** — more than `block_size / 8` docs have a value; a `block_size / 8`
//!   byte bitset.
//! - **SPARSE** — a vint count followed by sorted 16-bit in-block doc deltas.
//!
//! A jump table records, for every non-empty block, its absolute offset
//! within the presence region, letting a reader skip directly to the block
//! containing a queried doc id without scanning every preceding block.
//! This mirrors the real collaborator's contract closely enough to
//! exercise the presence-encoder adapter (§4.3) faithfully, but is a
//! deliberately simplified stand-in — the actual bitmap writer is an
//! external collaborator per §1 and is not this crate's subject matter.

use crate::output::ByteSink;

const BLOCK_SHIFT: u32 = 16;
const BLOCK_SIZE: u32 = 1 << BLOCK_SHIFT;
const DENSE_THRESHOLD: u32 = BLOCK_SIZE / 8;

const MARKER_ALL: u8 = 0;
const MARKER_DENSE: u8 = 1;
const MARKER_SPARSE: u8 = 2;

/// Result of serializing a presence bitmap.
pub struct PresenceWriteResult {
    /// Number of jump-table entries emitted (one per non-empty block).
    pub jump_table_entry_count: u16,
}

/// Serialize the (sorted, ascending) set of doc ids that have a value for
/// this field into `data`, using the default dense-rank power.
///
/// `doc_ids` must be sorted ascending and strictly increasing, and every
/// entry must be `< max_doc`. `0 < doc_ids.len() < max_doc` is assumed —
/// the fully-empty and fully-dense cases are short-circuited by the
/// caller (§4.3) before this function is ever invoked.
pub fn write_presence(data: &mut ByteSink, doc_ids: &[u32], max_doc: u32) -> PresenceWriteResult {
    debug_assert!(!doc_ids.is_empty());
    debug_assert!(doc_ids.windows(2).all(|w| w[0] < w[1]));

    let num_blocks = max_doc.div_ceil(BLOCK_SIZE);
    let mut jump_entries: Vec<(u32, u64)> = Vec::new();

    let mut idx = 0usize;
    for block in 0..num_blocks {
        let block_start = block * BLOCK_SIZE;
        let block_end = (block_start + BLOCK_SIZE).min(max_doc);
        let block_begin_idx = idx;
        while idx < doc_ids.len() && doc_ids[idx] < block_end {
            idx += 1;
        }
        let block_docs = &doc_ids[block_begin_idx..idx];
        if block_docs.is_empty() {
            continue;
        }

        let offset = data.position();
        jump_entries.push((block, offset));

        let block_len = block_end - block_start;
        if block_docs.len() as u32 == block_len {
            data.write_u8(MARKER_ALL);
        } else if block_docs.len() as u32 > DENSE_THRESHOLD {
            data.write_u8(MARKER_DENSE);
            let bitset_bytes = (block_len as usize).div_ceil(8);
            let mut bitset = vec![0u8; bitset_bytes];
            for &doc in block_docs {
                let rel = (doc - block_start) as usize;
                bitset[rel / 8] |= 1 << (rel % 8);
            }
            data.write_bytes(&bitset);
        } else {
            data.write_u8(MARKER_SPARSE);
            data.write_vint(block_docs.len() as u32);
            for &doc in block_docs {
                let rel = (doc - block_start) as u16;
                data.write_bytes(&rel.to_be_bytes());
            }
        }
    }

    // Jump table: one (block_index: i32, offset: i64) pair per non-empty
    // block, in block order.
    for (block, offset) in &jump_entries {
        data.write_i32(*block as i32);
        data.write_i64(*offset as i64);
    }

    PresenceWriteResult {
        jump_table_entry_count: jump_entries.len() as u16,
    }
}

/// Default dense-rank power passed through unchanged to the presence
/// bitmap writer (§4.3, §9 glossary "dense rank power").
pub const DEFAULT_DENSE_RANK_POWER: u8 = 9;

/// Sentinel `docsWithFieldOffset` recorded when no doc in the field has a
/// value.
pub const SENTINEL_NONE: i64 = -2;

/// Sentinel `docsWithFieldOffset` recorded when every doc (`0..maxDoc`)
/// has a value.
pub const SENTINEL_ALL: i64 = -1;

/// Write the four-field presence descriptor (§4.3) to `meta`, delegating
/// to [`write_presence`] for the partially-dense case.
///
/// `doc_ids` is the ascending list of docs with a value, as gathered by
/// the statistics tracker (§4.1).
pub fn write_presence_descriptor(
    data: &mut crate::output::ByteSink,
    meta: &mut crate::output::ByteSink,
    doc_ids: &[u32],
    max_doc: u32,
) {
    let docs_with_value = doc_ids.len() as u32;

    if docs_with_value == 0 {
        meta.write_i64(SENTINEL_NONE);
        meta.write_i64(0);
        meta.write_i16(-1);
        meta.write_i8(-1);
        return;
    }
    if docs_with_value == max_doc {
        meta.write_i64(SENTINEL_ALL);
        meta.write_i64(0);
        meta.write_i16(-1);
        meta.write_i8(-1);
        return;
    }

    let offset = data.position();
    let result = write_presence(data, doc_ids, max_doc);
    let length = data.position() - offset;

    meta.write_i64(offset as i64);
    meta.write_i64(length as i64);
    meta.write_i16(result.jump_table_entry_count as i16);
    meta.write_i8(DEFAULT_DENSE_RANK_POWER as i8);
}
