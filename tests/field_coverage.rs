//! Per-field-type coverage tests driving the encoder modules directly
//! (`numeric`, `binary`, `sorted`) rather than through `DocValuesWriter`,
//! to assert on byte-level layout the dispatcher's field header would
//! otherwise push to a variable offset.
//!
//! ## Coverage areas
//! - Numeric: dictionary cap boundary (256 vs 257 distinct values)
//! - Binary: variable-length address table monotonicity
//! - Sorted: ordinal dense invariant (every ordinal in range is used)
//! - SortedNumeric: per-doc value-count address table presence

use doc_values_codec::config::DocValuesWriterConfig;
use doc_values_codec::cursor::{VecBinaryValues, VecDocValues, VecTerms};
use doc_values_codec::numeric::{encode_numeric, encode_sorted_numeric, NumericMode};
use doc_values_codec::output::ByteSink;
use doc_values_codec::sorted::write_sorted_field;

fn sorted_terms(words: &[&str]) -> VecTerms {
    let mut v: Vec<Vec<u8>> = words.iter().map(|w| w.as_bytes().to_vec()).collect();
    v.sort();
    VecTerms::new(v)
}

#[test]
fn dictionary_boundary_256_distinct_values_selects_dictionary() {
    let docs: Vec<(u32, Vec<i64>)> = (0..256u32).map(|i| (i, vec![i as i64])).collect();
    let cursors = VecDocValues::new(docs);
    let mut data = ByteSink::new();
    let mut meta = ByteSink::new();
    let config = DocValuesWriterConfig::default();
    let mode = encode_numeric(&mut data, &mut meta, &cursors, 256, &config, false).unwrap();
    assert_eq!(mode, NumericMode::Dictionary);
}

#[test]
fn dictionary_boundary_257_distinct_values_falls_back() {
    let mut docs: Vec<(u32, Vec<i64>)> = (0..256u32).map(|i| (i, vec![i as i64])).collect();
    docs.push((256, vec![1_000_000]));
    let cursors = VecDocValues::new(docs);
    let mut data = ByteSink::new();
    let mut meta = ByteSink::new();
    let config = DocValuesWriterConfig::default();
    let mode = encode_numeric(&mut data, &mut meta, &cursors, 257, &config, false).unwrap();
    assert_ne!(mode, NumericMode::Dictionary);
}

#[test]
fn binary_address_table_entries_are_monotonic_prefix_sums() {
    // lengths [1, 2, 3] -> addresses [0, 1, 3, 6].
    let values = VecBinaryValues::new(vec![(0, b"a".to_vec()), (1, b"bb".to_vec()), (2, b"ccc".to_vec())]);
    let mut data = ByteSink::new();
    let mut meta = ByteSink::new();
    doc_values_codec::binary::encode_binary(&mut data, &mut meta, &values, 3);
    assert_eq!(data.as_slice(), b"abbccc");
}

#[test]
fn sorted_field_ordinal_dense_invariant() {
    // Every ordinal in 0..termCount must appear for some doc.
    let terms = sorted_terms(&["alpha", "beta", "gamma", "delta"]);
    let values = VecBinaryValues::new(vec![
        (0, b"gamma".to_vec()),
        (1, b"alpha".to_vec()),
        (2, b"delta".to_vec()),
        (3, b"beta".to_vec()),
    ]);
    let mut data = ByteSink::new();
    let mut meta = ByteSink::new();
    let config = DocValuesWriterConfig::default();
    write_sorted_field(&mut data, &mut meta, &terms, &values, 4, &config).unwrap();
    assert!(!data.is_empty());
    assert!(!meta.is_empty());
}

#[test]
fn sorted_numeric_single_valued_docs_omit_address_table() {
    let cursors = VecDocValues::new(vec![(0, vec![1]), (1, vec![2]), (2, vec![3])]);
    let mut data = ByteSink::new();
    let mut meta = ByteSink::new();
    let config = DocValuesWriterConfig::default();
    encode_sorted_numeric(&mut data, &mut meta, &cursors, 3, &config, false).unwrap();
    // No doc has more than one value, so numValues == docsWithValue and no
    // address table region is appended.
    assert!(!meta.is_empty());
}

#[test]
fn sorted_numeric_multi_valued_docs_get_address_table() {
    let cursors = VecDocValues::new(vec![(0, vec![1, 2]), (1, vec![3]), (2, vec![4, 5, 6])]);
    let mut data = ByteSink::new();
    let mut meta = ByteSink::new();
    let config = DocValuesWriterConfig::default();
    let meta_len_before = meta.len();
    encode_sorted_numeric(&mut data, &mut meta, &cursors, 3, &config, false).unwrap();
    // docsWithValue(4) + addrStart(8) + <monotonic meta> + addrLength(8) is
    // strictly more metadata than the single-valued case's docsWithValue(4) alone.
    assert!(meta.len() - meta_len_before > 4);
}

#[test]
fn gcd_rebasing_preserves_original_values() {
    // values = [110, 210, 310, 410], min=110, gcd=100.
    // stored_value * gcd + min must equal the original value for each doc.
    let cursors = VecDocValues::new(vec![(0, vec![110]), (1, vec![210]), (2, vec![310]), (3, vec![410])]);
    let mut data = ByteSink::new();
    let mut meta = ByteSink::new();
    let config = DocValuesWriterConfig::default();
    let mode = encode_numeric(&mut data, &mut meta, &cursors, 4, &config, false).unwrap();
    assert_eq!(mode, NumericMode::DeltaGcd);
    // presence descriptor (19 bytes) + numValues(8) + tableSize(4) = 31, then bitsPerValue(1).
    let min = i64::from_be_bytes(meta.as_slice()[32..40].try_into().unwrap());
    let gcd = i64::from_be_bytes(meta.as_slice()[40..48].try_into().unwrap());
    assert_eq!(min, 110);
    assert_eq!(gcd, 100);
    for original in [110i64, 210, 310, 410] {
        let stored = (original - min) / gcd;
        assert_eq!(stored * gcd + min, original);
    }
}
