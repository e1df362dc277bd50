//! Fixed-width bit-packed writer — a reimplementation of the external
//! `DirectWriter` primitive described in §1 as "consumed as a black box".
//!
//! The segment-file format depends on a compact, fixed-bits-per-value
//! encoding wherever the numeric encoder (§4.2), block mode, and the
//! monotonic-sequence writer (§4.1 of the monotonic module) need to store
//! a run of small non-negative integers. Packing is MSB-first within each
//! output byte: the first value's highest bit lands in the highest unused
//! bit of the current byte, so a zero-bits-per-value field degenerates
//! cleanly to "no data" at the call site without special-casing here.

use crate::output::ByteSink;

/// Streams a sequence of values into `sink`, each truncated to the low
/// `bits_per_value` bits, packed contiguously with no inter-value padding.
///
/// `bits_per_value == 0` is accepted and is a no-op for every `add` call
/// (all values must be `0` in that case — the caller is responsible for
/// only selecting this width when every value is in fact zero).
pub struct BitPacker<'a> {
    sink: &'a mut ByteSink,
    bits_per_value: u32,
    acc: u64,
    acc_bits: u32,
}

impl<'a> BitPacker<'a> {
    pub fn new(sink: &'a mut ByteSink, bits_per_value: u8) -> Self {
        Self {
            sink,
            bits_per_value: bits_per_value as u32,
            acc: 0,
            acc_bits: 0,
        }
    }

    /// Append one value, using only its low `bits_per_value` bits.
    pub fn add(&mut self, value: u64) {
        if self.bits_per_value == 0 {
            return;
        }
        let masked = if self.bits_per_value == 64 {
            value
        } else {
            value & ((1u64 << self.bits_per_value) - 1)
        };
        // Pack MSB-first: shift the new value in below the existing bits.
        self.acc = (self.acc << self.bits_per_value) | masked;
        self.acc_bits += self.bits_per_value;
        while self.acc_bits >= 8 {
            self.acc_bits -= 8;
            let byte = (self.acc >> self.acc_bits) as u8;
            self.sink.write_u8(byte);
        }
    }

    /// Flush any partial trailing byte, zero-padded in the low bits.
    pub fn finish(mut self) {
        if self.acc_bits > 0 {
            let byte = (self.acc << (8 - self.acc_bits)) as u8;
            self.sink.write_u8(byte);
            self.acc_bits = 0;
        }
    }
}

/// Number of whole bytes needed to pack `count` values at `bits_per_value`
/// bits each.
pub fn packed_byte_length(count: usize, bits_per_value: u8) -> usize {
    ((count as u64 * bits_per_value as u64) + 7) as usize / 8
}

/// Smallest bit width that can represent every value in `0..=max_value`
/// (i.e. `ceil(log2(max_value + 1))`), with a floor of 1 so callers don't
/// need to special-case an all-zero range (the constant-value case is
/// handled separately by the numeric encoder using `bits_per_value = 0`).
pub fn bits_required(max_value: u64) -> u8 {
    if max_value == 0 {
        return 0;
    }
    (64 - max_value.leading_zeros()) as u8
}
