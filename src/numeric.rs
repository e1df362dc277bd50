//! Numeric value encoder (§4.2) — the heart of the codec.
//!
//! Given the statistics gathered by [`crate::stats`], chooses exactly one
//! of four encodings and writes the resulting bytes to `data` plus a
//! fixed-layout descriptor to `meta` (§6, "Numeric payload"). This same
//! encoder backs the numeric field type directly and the ordinal streams
//! that back Sorted/SortedSet fields (§4.5), distinguished only by the
//! `is_ordinals` assertion below.

use tracing::trace;

use crate::bitpacking::{bits_required, packed_byte_length, BitPacker};
use crate::config::DocValuesWriterConfig;
use crate::cursor::DocValuesCursorFactory;
use crate::error::{DocValuesError, Result};
use crate::output::ByteSink;
use crate::presence::write_presence_descriptor;
use crate::stats::{compute_numeric_stats, NumericStats};

/// `tableSize` sentinel meaning "no table; bit-packed with `(min, gcd)`
/// reconstruction".
const TABLE_NONE: i32 = -1;
/// `tableSize` sentinel meaning "every value is zero; data omitted".
const TABLE_ALL_ZERO: i32 = 0;
/// `bitsPerValue` sentinel meaning "block mode; see the jump table".
const BITS_PER_VALUE_BLOCK_MODE: u8 = 0xFF;

/// Which of the four encodings (§4.2 "Mode selection") was chosen for a
/// field. Exposed for tests and for the `trace`-level diagnostic event
/// (§4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericMode {
    Constant,
    Dictionary,
    Block,
    DeltaGcd,
}

/// Encode one numeric (or ordinal) doc-values stream.
///
/// `is_ordinals` enables the programmer-invariant assertions from §4.2
/// ("Ordinal fields"): a caller passing an ordinal stream with a nonzero
/// `min`, or a nonzero `gcd` alongside a nonzero `max`, has a bug, and
/// this returns [`DocValuesError::Internal`] rather than silently
/// producing a corrupt segment.
pub fn encode_numeric<F>(
    data: &mut ByteSink,
    meta: &mut ByteSink,
    cursors: &F,
    max_doc: u32,
    config: &DocValuesWriterConfig,
    is_ordinals: bool,
) -> Result<NumericMode>
where
    F: DocValuesCursorFactory,
{
    let stats = compute_numeric_stats(
        cursors.open(),
        config.numeric_block_size(),
        config.max_distinct_for_dictionary,
    );

    if is_ordinals && stats.num_values > 0 && (stats.min != 0 || (stats.max != 0 && stats.gcd != 1)) {
        return Err(DocValuesError::Internal(format!(
            "ordinal stream violates invariant: min={} max={} gcd={}",
            stats.min, stats.max, stats.gcd
        )));
    }

    write_presence_descriptor(data, meta, &stats.doc_ids, max_doc);
    meta.write_i64(stats.num_values as i64);

    if stats.num_values == 0 {
        write_constant(meta, data, 0);
        trace!(mode = "constant", num_values = 0, "numeric field empty");
        return Ok(NumericMode::Constant);
    }

    if stats.is_constant() {
        write_constant(meta, data, stats.min);
        trace!(mode = "constant", value = stats.min, "numeric field constant");
        return Ok(NumericMode::Constant);
    }

    if let Some(mode) = try_dictionary(data, meta, cursors, &stats)? {
        trace!(mode = "dictionary", distinct = stats.distinct.as_ref().map(Vec::len), "numeric field dictionary-encoded");
        return Ok(mode);
    }

    let ratio = stats.space_in_bits_blocks as f64 / stats.space_in_bits_single as f64;
    if ratio <= 0.9 {
        write_block_mode(data, meta, cursors, &stats, config)?;
        trace!(mode = "block", ratio, "numeric field block-encoded");
        return Ok(NumericMode::Block);
    }

    write_delta_gcd(data, meta, cursors, &stats)?;
    trace!(mode = "delta_gcd", "numeric field delta/gcd-encoded");
    Ok(NumericMode::DeltaGcd)
}

fn write_constant(meta: &mut ByteSink, data: &mut ByteSink, value: i64) {
    meta.write_i32(TABLE_NONE);
    meta.write_i8(0);
    meta.write_i64(value);
    meta.write_i64(1);
    meta.write_i64(data.position() as i64);
    meta.write_i64(0);
    meta.write_i64(-1);
}

/// Attempt the dictionary encoding (§4.2). Returns `Ok(None)` when the
/// dictionary candidate is unavailable or loses to the delta/GCD bit
/// width, leaving `data`/`meta` untouched.
fn try_dictionary<F>(
    data: &mut ByteSink,
    meta: &mut ByteSink,
    cursors: &F,
    stats: &NumericStats,
) -> Result<Option<NumericMode>>
where
    F: DocValuesCursorFactory,
{
    let Some(distinct) = stats.distinct.as_ref() else {
        return Ok(None);
    };
    if distinct.len() <= 1 {
        return Ok(None);
    }

    let ordinal_bits = bits_required((distinct.len() - 1) as u64);
    let delta_over_gcd = ((stats.max - stats.min) / stats.gcd) as u64;
    let delta_bits = bits_required(delta_over_gcd);

    if ordinal_bits >= delta_bits {
        return Ok(None);
    }

    meta.write_i32(distinct.len() as i32);
    for &v in distinct {
        meta.write_i64(v);
    }
    meta.write_i8(ordinal_bits as i8);
    meta.write_i64(0); // min, overwritten per §4.2
    meta.write_i64(1); // gcd, overwritten per §4.2

    let value_offset = data.position();
    {
        let mut packer = BitPacker::new(data, ordinal_bits);
        let mut cursor = cursors.open();
        while let Some(_doc) = cursor.next_doc() {
            for _ in 0..cursor.value_count() {
                let v = cursor.next_value();
                let ord = distinct
                    .binary_search(&v)
                    .expect("value observed during stats pass must appear in the distinct table");
                packer.add(ord as u64);
            }
        }
        packer.finish();
    }
    let value_length = data.position() - value_offset;

    meta.write_i64(value_offset as i64);
    meta.write_i64(value_length as i64);
    meta.write_i64(-1);

    Ok(Some(NumericMode::Dictionary))
}

fn write_block_mode<F>(
    data: &mut ByteSink,
    meta: &mut ByteSink,
    cursors: &F,
    stats: &NumericStats,
    config: &DocValuesWriterConfig,
) -> Result<()>
where
    F: DocValuesCursorFactory,
{
    let block_size = config.numeric_block_size();
    meta.write_i32(-2 - config.numeric_block_shift as i32);
    meta.write_i8(BITS_PER_VALUE_BLOCK_MODE as i8);
    meta.write_i64(stats.min);
    meta.write_i64(stats.gcd);

    let value_offset = data.position();
    let mut block_offsets: Vec<i64> = Vec::new();
    let mut buffer: Vec<i64> = Vec::with_capacity(block_size);

    let mut cursor = cursors.open();
    let mut flush = |buffer: &mut Vec<i64>, data: &mut ByteSink, block_offsets: &mut Vec<i64>| {
        if buffer.is_empty() {
            return;
        }
        block_offsets.push(data.position() as i64);
        let block_min = *buffer.iter().min().unwrap();
        let block_max = *buffer.iter().max().unwrap();
        let bits = if block_min == block_max {
            0
        } else {
            bits_required(((block_max - block_min) / stats.gcd) as u64)
        };
        data.write_u8(bits);
        data.write_i64(block_min);
        if bits > 0 {
            let packed_len = packed_byte_length(buffer.len(), bits);
            data.write_i32(packed_len as i32);
            let mut packer = BitPacker::new(data, bits);
            for &v in buffer.iter() {
                packer.add(((v - block_min) / stats.gcd) as u64);
            }
            packer.finish();
        }
        buffer.clear();
    };

    while let Some(_doc) = cursor.next_doc() {
        for _ in 0..cursor.value_count() {
            buffer.push(cursor.next_value());
            if buffer.len() == block_size {
                flush(&mut buffer, data, &mut block_offsets);
            }
        }
    }
    flush(&mut buffer, data, &mut block_offsets);

    let jump_table_offset = data.position();
    for offset in &block_offsets {
        data.write_i64(*offset);
    }
    data.write_i64(jump_table_offset as i64);

    let value_length = data.position() - value_offset;
    meta.write_i64(value_offset as i64);
    meta.write_i64(value_length as i64);
    meta.write_i64(jump_table_offset as i64);

    Ok(())
}

fn write_delta_gcd<F>(data: &mut ByteSink, meta: &mut ByteSink, cursors: &F, stats: &NumericStats) -> Result<()>
where
    F: DocValuesCursorFactory,
{
    let bits_per_value = bits_required(((stats.max - stats.min) / stats.gcd) as u64);

    // Min-rebasing optimization (§4.2, §9 open question): only when it
    // cannot change the bit width.
    let rebase = stats.gcd == 1
        && stats.min > 0
        && bits_required(stats.max as u64) == bits_required((stats.max - stats.min) as u64);
    let effective_min = if rebase { 0 } else { stats.min };

    meta.write_i32(TABLE_NONE);
    meta.write_i8(bits_per_value as i8);
    meta.write_i64(effective_min);
    meta.write_i64(stats.gcd);

    let value_offset = data.position();
    {
        let mut packer = BitPacker::new(data, bits_per_value);
        let mut cursor = cursors.open();
        while let Some(_doc) = cursor.next_doc() {
            for _ in 0..cursor.value_count() {
                let v = cursor.next_value();
                packer.add(((v - effective_min) / stats.gcd) as u64);
            }
        }
        packer.finish();
    }
    let value_length = data.position() - value_offset;

    meta.write_i64(value_offset as i64);
    meta.write_i64(value_length as i64);
    meta.write_i64(-1);

    Ok(())
}

/// Encode a multi-valued numeric stream (§4.2) followed by the
/// SortedNumeric tail (§4.7): a `docsWithField` count and, only when the
/// field is genuinely multi-valued, a monotonic address table of
/// cumulative per-doc value counts.
///
/// Used directly for SortedNumeric fields and, with `is_ordinals = true`,
/// for the multi-valued branch of SortedSet (§4.5), which feeds resolved
/// ordinals through this same pipeline.
pub fn encode_sorted_numeric<F>(
    data: &mut ByteSink,
    meta: &mut ByteSink,
    cursors: &F,
    max_doc: u32,
    config: &DocValuesWriterConfig,
    is_ordinals: bool,
) -> Result<NumericMode>
where
    F: DocValuesCursorFactory,
{
    let mode = encode_numeric(data, meta, cursors, max_doc, config, is_ordinals)?;

    let mut docs_with_value: u32 = 0;
    let mut counts: Vec<u64> = Vec::new();
    {
        let mut cursor = cursors.open();
        while cursor.next_doc().is_some() {
            docs_with_value += 1;
            counts.push(cursor.value_count() as u64);
        }
    }
    meta.write_i32(docs_with_value as i32);

    let num_values: u64 = counts.iter().sum();
    if num_values > docs_with_value as u64 {
        let mut cumulative: Vec<u64> = Vec::with_capacity(counts.len() + 1);
        let mut running = 0u64;
        cumulative.push(running);
        for count in &counts {
            running += count;
            cumulative.push(running);
        }

        let addr_start = data.position();
        meta.write_i64(addr_start as i64);
        let region = crate::monotonic::write_monotonic(
            data,
            meta,
            &cumulative,
            crate::monotonic::DEFAULT_BLOCK_SHIFT,
        );
        meta.write_i64(region.addr_length as i64);
    }

    Ok(mode)
}
