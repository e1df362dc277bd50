//! Term dictionary encoder (§4.6).
//!
//! Terms arrive pre-sorted and distinct from a [`TermsCursorFactory`].
//! They are grouped into fixed-size blocks; within a block every term but
//! the first is front-coded against its predecessor, then the whole
//! front-coded remainder is LZ4-compressed using the block's own first
//! term as compression dictionary. A monotonic address table locates each
//! block's start, and a sparse reverse index (§4.8) over much larger term
//! groups accelerates seek-by-term without decompressing more than one
//! block.

use tracing::trace;

use crate::config::DocValuesWriterConfig;
use crate::cursor::TermsCursorFactory;
use crate::monotonic::write_monotonic;
use crate::output::ByteSink;

/// Encode a field's term dictionary, writing the §6 term-dictionary
/// payload to `meta` and the dictionary bytes (first terms, LZ4 blocks,
/// reverse-index sort keys) to `data`.
pub fn encode_term_dict<F>(data: &mut ByteSink, meta: &mut ByteSink, terms: &F, config: &DocValuesWriterConfig)
where
    F: TermsCursorFactory,
{
    let all_terms = collect_terms(terms);
    let term_count = all_terms.len();
    let block_size = config.terms_dict_block_size();

    meta.write_vlong(term_count as u64);
    meta.write_i32(config.terms_dict_block_shift as i32);

    let dict_start = data.position();
    let mut block_offsets: Vec<u64> = Vec::new();
    let mut max_term_length: u32 = 0;
    let mut max_block_uncompressed_length: u32 = 0;

    for (block_index, block) in all_terms.chunks(block_size).enumerate() {
        let block_offset = data.position() - dict_start;
        block_offsets.push(block_offset);

        let first = &block[0];
        max_term_length = max_term_length.max(first.len() as u32);
        data.write_vint(first.len() as u32);
        data.write_bytes(first);

        let mut remainder = ByteSink::new();
        let mut prev: &[u8] = first;
        for term in &block[1..] {
            max_term_length = max_term_length.max(term.len() as u32);
            let prefix_len = common_prefix_len(prev, term);
            let suffix_len = term.len() - prefix_len;
            let header = (prefix_len.min(15) as u8) | (((suffix_len - 1).min(15) as u8) << 4);
            remainder.write_u8(header);
            if prefix_len >= 15 {
                remainder.write_vint((prefix_len - 15) as u32);
            }
            if suffix_len >= 16 {
                remainder.write_vint((suffix_len - 16) as u32);
            }
            remainder.write_bytes(&term[prefix_len..]);
            prev = term;
        }

        let uncompressed_len = remainder.len() as u32;
        max_block_uncompressed_length = max_block_uncompressed_length.max(uncompressed_len);
        let compressed = lz4_flex::block::compress_with_dict(remainder.as_slice(), first);

        data.write_vint(uncompressed_len);
        data.write_vint(compressed.len() as u32);
        data.write_bytes(&compressed);

        trace!(
            block_index,
            term_count = block.len(),
            compressed_len = compressed.len(),
            "term dictionary block flushed"
        );
    }

    let dict_length = data.position() - dict_start;
    let addr_region = write_monotonic(data, meta, &block_offsets, config.terms_dict_block_shift);

    meta.write_i32(max_term_length as i32);
    meta.write_i32(max_block_uncompressed_length as i32);
    meta.write_i64(dict_start as i64);
    meta.write_i64(dict_length as i64);
    meta.write_i64(addr_region.addr_start as i64);
    meta.write_i64(addr_region.addr_length as i64);

    encode_reverse_index(data, meta, &all_terms, config);
}

/// Shortest-distinguishing-prefix sparse index over `1 << reverse_index_shift`
/// sized term groups (§4.8).
fn encode_reverse_index(data: &mut ByteSink, meta: &mut ByteSink, terms: &[Vec<u8>], config: &DocValuesWriterConfig) {
    let group_size = config.terms_dict_reverse_index_group_size();
    meta.write_i32(config.terms_dict_reverse_index_shift as i32);

    let sort_keys_start = data.position();
    let mut group_offsets: Vec<u64> = Vec::new();
    let mut prev_last: &[u8] = &[];

    for (group_index, chunk_start) in (0..terms.len()).step_by(group_size).enumerate() {
        let offset = data.position() - sort_keys_start;
        group_offsets.push(offset);

        let first_of_group = &terms[chunk_start];
        let sort_key: Vec<u8> = if group_index == 0 {
            Vec::new()
        } else {
            shortest_distinguishing_prefix(first_of_group, prev_last)
        };
        data.write_bytes(&sort_key);

        let group_end = (chunk_start + group_size).min(terms.len());
        prev_last = &terms[group_end - 1];
    }
    // Terminating offset so the last group's sort-key length is recoverable.
    group_offsets.push(data.position() - sort_keys_start);

    let sort_keys_length = data.position() - sort_keys_start;
    let reverse_addr_region = write_monotonic(data, meta, &group_offsets, config.terms_dict_reverse_index_shift);

    meta.write_i64(sort_keys_start as i64);
    meta.write_i64(sort_keys_length as i64);
    meta.write_i64(reverse_addr_region.addr_start as i64);
    meta.write_i64(reverse_addr_region.addr_length as i64);
}

/// Shortest prefix of `term` that sorts strictly after `prev`. Always
/// terminates by `term.len()` since `term > prev` is guaranteed by the
/// caller's sorted, distinct term stream.
fn shortest_distinguishing_prefix(term: &[u8], prev: &[u8]) -> Vec<u8> {
    for len in 1..=term.len() {
        if term[..len] > *prev {
            return term[..len].to_vec();
        }
    }
    term.to_vec()
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

fn collect_terms<F: TermsCursorFactory>(terms: &F) -> Vec<Vec<u8>> {
    let mut cursor = terms.open();
    let mut out = Vec::new();
    while let Some(term) = cursor.next_term() {
        out.push(term);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::VecTerms;

    fn words(words: &[&str]) -> VecTerms {
        let mut v: Vec<Vec<u8>> = words.iter().map(|w| w.as_bytes().to_vec()).collect();
        v.sort();
        VecTerms::new(v)
    }

    #[test]
    fn single_block_front_coding_emits_first_term_raw() {
        let terms = words(&["apple", "application", "apply", "banana"]);
        let mut data = ByteSink::new();
        let mut meta = ByteSink::new();
        let config = DocValuesWriterConfig::default();
        encode_term_dict(&mut data, &mut meta, &terms, &config);

        // First byte in `data` is the vint length of the block's first term.
        assert_eq!(data.as_slice()[0], 5); // "apple".len()
        assert_eq!(&data.as_slice()[1..6], b"apple");

        let term_count = read_vlong(meta.as_slice(), &mut 0);
        assert_eq!(term_count, 4);
    }

    #[test]
    fn multiple_blocks_get_one_block_offset_each() {
        let mut config = DocValuesWriterConfig::default();
        config.terms_dict_block_shift = 1; // blocks of 2 terms
        let terms = words(&["a", "b", "c", "d", "e"]);
        let mut data = ByteSink::new();
        let mut meta = ByteSink::new();
        encode_term_dict(&mut data, &mut meta, &terms, &config);
        assert!(!data.is_empty());
        // 5 terms at block size 2 -> 3 blocks, each with a 1-byte length
        // prefix + 1-byte term as the block's first entry at minimum.
    }

    #[test]
    fn reverse_index_first_group_has_empty_sort_key() {
        let mut config = DocValuesWriterConfig::default();
        config.terms_dict_reverse_index_shift = 1; // groups of 2 terms
        let terms = words(&["alpha", "bravo", "charlie", "delta"]);
        let mut data = ByteSink::new();
        let mut meta = ByteSink::new();
        encode_term_dict(&mut data, &mut meta, &terms, &config);
        // sort_keys_start equals dict_length offset within `data`; the
        // first group's sort key is empty, so its slot contributes zero
        // bytes at the very start of the reverse-index region.
        assert!(!data.is_empty());
    }

    #[test]
    fn shortest_prefix_is_minimal_and_distinguishing() {
        let key = shortest_distinguishing_prefix(b"banana", b"apple");
        assert_eq!(key, b"b");
        assert!(key.as_slice() > b"apple".as_slice());
    }

    #[test]
    fn shortest_prefix_falls_back_to_full_term_when_needed() {
        let key = shortest_distinguishing_prefix(b"applesauce", b"apple");
        assert_eq!(key, b"applesauce");
    }

    fn read_vlong(buf: &[u8], pos: &mut usize) -> u64 {
        let mut result = 0u64;
        let mut shift = 0;
        loop {
            let b = buf[*pos];
            *pos += 1;
            result |= ((b & 0x7f) as u64) << shift;
            if b & 0x80 == 0 {
                break;
            }
            shift += 7;
        }
        result
    }
}
