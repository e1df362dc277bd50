//! Monotonic non-decreasing sequence writer — a reimplementation of the
//! external `DirectMonotonicWriter` primitive (§1, consumed elsewhere as a
//! black box "producing a compact representation of a non-decreasing
//! sequence together with its own metadata").
//!
//! Every address table in this crate (binary value offsets, term-dictionary
//! block offsets, reverse-index group offsets, sorted-numeric value counts)
//! is a non-decreasing `u64` sequence, so they all go through
//! [`write_monotonic`].
//!
//! # Encoding
//!
//! The sequence is split into fixed-size blocks of `1 << block_shift`
//! values (the final block may be shorter). Within a block, each value is
//! approximated by a line through its endpoints:
//!
//! ```text
//! expected[i] = block_min + round(avg * i)
//! delta[i]    = value[i] - expected[i]
//! ```
//!
//! `delta` can run negative near the middle of a block even though the
//! original sequence is non-decreasing, so the block additionally records
//! `min_delta` and bit-packs `delta[i] - min_delta` (always `>= 0`) at the
//! block's locally optimal width. This is the `min + k·avgInc + delta[k]`
//! scheme from the glossary.

use crate::bitpacking::{bits_required, BitPacker};
use crate::output::ByteSink;

/// Default block size shift for address tables that don't otherwise have a
/// configured block size (binary value offsets, SortedNumeric value
/// counts): `1 << 10` = 1024 entries per block.
pub const DEFAULT_BLOCK_SHIFT: u8 = 10;

/// Describes where a monotonic sequence's bit-packed block data landed in
/// the `data` stream, for embedding in the caller's metadata payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonotonicRegion {
    pub addr_start: u64,
    pub addr_length: u64,
}

/// Write `values` (must be non-decreasing) as a monotonic block sequence.
///
/// Writes per-block headers (`block_min`, `avg` bits, `min_delta`,
/// `bits_per_value`) to `meta`, and the bit-packed delta blocks to `data`.
/// Returns the region of `data` the blocks occupy.
pub fn write_monotonic(
    data: &mut ByteSink,
    meta: &mut ByteSink,
    values: &[u64],
    block_shift: u8,
) -> MonotonicRegion {
    let block_size = 1usize << block_shift;
    let addr_start = data.position();

    meta.write_vlong(values.len() as u64);
    meta.write_u8(block_shift);

    for block in values.chunks(block_size) {
        write_block(data, meta, block);
    }

    MonotonicRegion {
        addr_start,
        addr_length: data.position() - addr_start,
    }
}

fn write_block(data: &mut ByteSink, meta: &mut ByteSink, block: &[u64]) {
    debug_assert!(!block.is_empty());
    let block_min = block[0] as i64;
    let avg = if block.len() > 1 {
        (block[block.len() - 1] as i64 - block_min) as f64 / (block.len() - 1) as f64
    } else {
        0.0
    };

    let deltas: Vec<i64> = block
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let expected = block_min + (avg * i as f64).round() as i64;
            v as i64 - expected
        })
        .collect();

    let min_delta = deltas.iter().copied().min().unwrap_or(0);
    let max_offset = deltas.iter().map(|&d| (d - min_delta) as u64).max().unwrap_or(0);
    let bits_per_value = bits_required(max_offset);

    meta.write_i64(block_min);
    meta.write_u64(avg.to_bits());
    meta.write_i64(min_delta);
    meta.write_u8(bits_per_value);

    if bits_per_value > 0 {
        let mut packer = BitPacker::new(data, bits_per_value);
        for &d in &deltas {
            packer.add((d - min_delta) as u64);
        }
        packer.finish();
    }
}
