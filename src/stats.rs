//! MinMax/GCD statistics tracker (§4.1).
//!
//! A single forward pass over a [`DocValuesCursor`] that the numeric
//! encoder (§4.2) needs *before* it can write a single byte: global
//! min/max, a running GCD of offsets from the first value, a capped
//! distinct-value set for the dictionary encoding candidate, and the
//! per-block vs. whole-field bit-cost estimates that drive the block-mode
//! decision (§8, testable property 3).
//!
//! Because this pass must run to completion before the data pass begins,
//! the writer always requests a *fresh* cursor from the
//! [`DocValuesCursorFactory`](crate::cursor::DocValuesCursorFactory) for
//! this scan, then a second fresh cursor for the actual encode (§9,
//! "two-pass statistics requirement").

use crate::bitpacking::bits_required;
use crate::cursor::DocValuesCursor;

/// Guard against overflow when computing `v - first_value`: once any
/// value's magnitude exceeds this bound, GCD tracking is abandoned.
const GCD_OVERFLOW_GUARD: i64 = 1 << 62;

/// Statistics gathered over one full pass of a numeric (or ordinal)
/// doc-values stream.
#[derive(Debug, Clone)]
pub struct NumericStats {
    pub docs_with_value: u64,
    pub num_values: u64,
    pub min: i64,
    pub max: i64,
    pub gcd: i64,
    /// Distinct values seen, sorted ascending, capped at
    /// [`DocValuesWriterConfig::max_distinct_for_dictionary`]; `None` once
    /// the cap was exceeded (dictionary encoding permanently disabled).
    ///
    /// [`DocValuesWriterConfig::max_distinct_for_dictionary`]: crate::config::DocValuesWriterConfig::max_distinct_for_dictionary
    pub distinct: Option<Vec<i64>>,
    pub space_in_bits_blocks: u64,
    pub space_in_bits_single: u64,
    /// Every doc id yielded by the cursor, ascending, fed to the presence
    /// encoder adapter (§4.3) when the field is neither empty nor fully
    /// dense.
    pub doc_ids: Vec<u32>,
}

impl NumericStats {
    /// `true` once `min == max` (the constant-value case, §4.2).
    pub fn is_constant(&self) -> bool {
        self.num_values > 0 && self.min == self.max
    }
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Scan `cursor` to completion, computing [`NumericStats`].
///
/// `block_size` is `1 << numeric_block_shift` (§4.1); `max_distinct` is
/// the dictionary cap (§4.1, default `256`).
pub fn compute_numeric_stats(
    mut cursor: impl DocValuesCursor,
    block_size: usize,
    max_distinct: usize,
) -> NumericStats {
    let mut docs_with_value: u64 = 0;
    let mut num_values: u64 = 0;
    let mut min = i64::MAX;
    let mut max = i64::MIN;

    let mut first_value: Option<i64> = None;
    let mut gcd: i64 = 0;
    let mut gcd_abandoned = false;

    let mut distinct: Option<std::collections::HashSet<i64>> = Some(Default::default());

    let mut space_in_bits_blocks: u64 = 0;
    let mut block_min = i64::MAX;
    let mut block_max = i64::MIN;
    let mut in_block = 0usize;
    let mut doc_ids: Vec<u32> = Vec::new();

    let mut flush_block = |block_min: i64, block_max: i64, count: usize, space_in_bits_blocks: &mut u64| {
        if block_max >= block_min {
            let range = (block_max - block_min) as u64;
            let bits = bits_required(range) as u64;
            *space_in_bits_blocks += bits * count as u64;
        }
    };

    while let Some(doc) = cursor.next_doc() {
        docs_with_value += 1;
        doc_ids.push(doc);
        let count = cursor.value_count();
        for _ in 0..count {
            let v = cursor.next_value();
            num_values += 1;
            min = min.min(v);
            max = max.max(v);

            if !gcd_abandoned && v.unsigned_abs() > GCD_OVERFLOW_GUARD as u64 {
                gcd_abandoned = true;
                gcd = 1;
            }

            if let Some(fv) = first_value {
                if !gcd_abandoned {
                    let delta = v.wrapping_sub(fv).unsigned_abs();
                    gcd = gcd_u64(gcd as u64, delta) as i64;
                }
            } else {
                first_value = Some(v);
            }

            if let Some(set) = distinct.as_mut() {
                set.insert(v);
                if set.len() > max_distinct {
                    distinct = None;
                }
            }

            block_min = block_min.min(v);
            block_max = block_max.max(v);
            in_block += 1;
            if in_block == block_size {
                flush_block(block_min, block_max, in_block, &mut space_in_bits_blocks);
                block_min = i64::MAX;
                block_max = i64::MIN;
                in_block = 0;
            }
        }
    }
    if in_block > 0 {
        flush_block(block_min, block_max, in_block, &mut space_in_bits_blocks);
    }

    if num_values == 0 {
        min = 0;
        max = 0;
    }
    if gcd == 0 {
        // No second value ever arrived to establish a nonzero delta.
        gcd = 1;
    }

    let space_in_bits_single = if num_values == 0 {
        0
    } else {
        bits_required((max - min) as u64) as u64 * num_values
    };

    let distinct_sorted = distinct.map(|set| {
        let mut v: Vec<i64> = set.into_iter().collect();
        v.sort_unstable();
        v
    });

    NumericStats {
        docs_with_value,
        num_values,
        min,
        max,
        gcd,
        distinct: distinct_sorted,
        space_in_bits_blocks,
        space_in_bits_single,
        doc_ids,
    }
}
