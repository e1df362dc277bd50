//! Field dispatcher (§2 "Field dispatcher (`DocValuesWriter`)", §3
//! "Lifecycle").
//!
//! [`DocValuesWriter`] is the crate's single public entry point: it owns
//! the `data` and `meta` streams, accepts one call per field in whatever
//! order the caller chooses, routes each to the matching encoder, and on
//! [`close`](DocValuesWriter::close) writes the metadata sentinel and
//! both stream trailers before flushing to the caller-supplied output.
//!
//! Opening a segment's actual files is an external concern — this
//! writer accumulates both streams in memory and only touches `impl
//! std::io::Write` at `close()`, building the footer in full before a
//! single final flush.

use std::io;

use tracing::{debug, error, info};

use crate::binary::encode_binary;
use crate::config::DocValuesWriterConfig;
use crate::cursor::{BinaryValuesCursorFactory, DocValuesCursorFactory, SortedSetValuesCursorFactory, TermsCursorFactory};
use crate::error::{DocValuesError, Result};
use crate::framing;
use crate::numeric::{encode_numeric, encode_sorted_numeric};
use crate::output::ByteSink;
use crate::sorted::{write_sorted_field, write_sorted_set_field};

/// Fixed doc-values type tags (§6), stable across writer and reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum DocValuesType {
    Numeric = 0,
    Binary = 1,
    Sorted = 2,
    SortedNumeric = 3,
    SortedSet = 4,
}

/// Writes a complete doc-values segment: one call per field, then
/// [`close`](Self::close).
///
/// # Example
///
/// ```
/// use doc_values_codec::config::DocValuesWriterConfig;
/// use doc_values_codec::cursor::VecDocValues;
/// use doc_values_codec::writer::DocValuesWriter;
///
/// let mut writer = DocValuesWriter::new(4, b"segment_0".to_vec(), DocValuesWriterConfig::default());
/// let field = VecDocValues::new(vec![(0, vec![10]), (1, vec![20]), (2, vec![30]), (3, vec![40])]);
/// writer.add_numeric_field(0, &field).unwrap();
///
/// let mut data_out = Vec::new();
/// let mut meta_out = Vec::new();
/// writer.close(&mut data_out, &mut meta_out).unwrap();
/// assert!(!data_out.is_empty());
/// assert!(!meta_out.is_empty());
/// ```
pub struct DocValuesWriter {
    config: DocValuesWriterConfig,
    max_doc: u32,
    data: ByteSink,
    meta: ByteSink,
    fields_written: u32,
    closed: bool,
}

impl DocValuesWriter {
    /// Open a writer for a segment with `max_doc` documents, writing the
    /// framing header to both streams immediately.
    pub fn new(max_doc: u32, segment_id: Vec<u8>, config: DocValuesWriterConfig) -> Self {
        let mut data = ByteSink::with_capacity(config.dictionary_buffer_initial_capacity);
        let mut meta = ByteSink::new();
        framing::write_header(&mut data, &segment_id);
        framing::write_header(&mut meta, &segment_id);
        Self {
            config,
            max_doc,
            data,
            meta,
            fields_written: 0,
            closed: false,
        }
    }

    fn write_field_header(&mut self, field_number: i32, doc_values_type: DocValuesType) {
        self.meta.write_i32(field_number);
        self.meta.write_i8(doc_values_type as i8);
    }

    /// Write a Numeric field (§4.2): one `i64` per doc, optional.
    pub fn add_numeric_field<F>(&mut self, field_number: i32, cursors: &F) -> Result<()>
    where
        F: DocValuesCursorFactory,
    {
        self.write_field_header(field_number, DocValuesType::Numeric);
        let before = self.data.position();
        encode_numeric(&mut self.data, &mut self.meta, cursors, self.max_doc, &self.config, false)?;
        self.finish_field(field_number, "NUMERIC", before);
        Ok(())
    }

    /// Write a Binary field (§4.4): one opaque byte string per doc,
    /// optional.
    pub fn add_binary_field<F>(&mut self, field_number: i32, cursors: &F) -> Result<()>
    where
        F: BinaryValuesCursorFactory,
    {
        self.write_field_header(field_number, DocValuesType::Binary);
        let before = self.data.position();
        encode_binary(&mut self.data, &mut self.meta, cursors, self.max_doc);
        self.finish_field(field_number, "BINARY", before);
        Ok(())
    }

    /// Write a Sorted field (§4.5): one ordinal per doc into a shared
    /// term dictionary.
    pub fn add_sorted_field<TF, VF>(&mut self, field_number: i32, terms: &TF, values: &VF) -> Result<()>
    where
        TF: TermsCursorFactory,
        VF: BinaryValuesCursorFactory,
    {
        self.write_field_header(field_number, DocValuesType::Sorted);
        let before = self.data.position();
        write_sorted_field(&mut self.data, &mut self.meta, terms, values, self.max_doc, &self.config)?;
        self.finish_field(field_number, "SORTED", before);
        Ok(())
    }

    /// Write a SortedNumeric field (§4.7): zero-or-more `i64` per doc.
    pub fn add_sorted_numeric_field<F>(&mut self, field_number: i32, cursors: &F) -> Result<()>
    where
        F: DocValuesCursorFactory,
    {
        self.write_field_header(field_number, DocValuesType::SortedNumeric);
        let before = self.data.position();
        encode_sorted_numeric(&mut self.data, &mut self.meta, cursors, self.max_doc, &self.config, false)?;
        self.finish_field(field_number, "SORTED_NUMERIC", before);
        Ok(())
    }

    /// Write a SortedSet field (§4.5): zero-or-more ordinals per doc into
    /// a shared term dictionary.
    pub fn add_sorted_set_field<TF, VF>(&mut self, field_number: i32, terms: &TF, values: &VF) -> Result<()>
    where
        TF: TermsCursorFactory,
        VF: SortedSetValuesCursorFactory,
    {
        self.write_field_header(field_number, DocValuesType::SortedSet);
        let before = self.data.position();
        write_sorted_set_field(&mut self.data, &mut self.meta, terms, values, self.max_doc, &self.config)?;
        self.finish_field(field_number, "SORTED_SET", before);
        Ok(())
    }

    fn finish_field(&mut self, field_number: i32, doc_values_type: &'static str, data_before: u64) {
        self.fields_written += 1;
        debug!(
            field_number,
            doc_values_type,
            data_bytes_written = self.data.position() - data_before,
            "field written"
        );
    }

    /// Write the metadata sentinel, append both trailers, and flush the
    /// accumulated streams to the caller-supplied output.
    ///
    /// On I/O failure, the caller must discard whatever partial bytes
    /// made it to `data_out`/`meta_out` — this crate does not own the
    /// underlying files and cannot clean them up itself (§1, §7).
    pub fn close<W: io::Write>(mut self, data_out: &mut W, meta_out: &mut W) -> Result<()> {
        const SENTINEL_FIELD_NUMBER: i32 = -1;
        self.meta.write_i32(SENTINEL_FIELD_NUMBER);
        framing::write_trailer(&mut self.data);
        framing::write_trailer(&mut self.meta);

        let result = (|| -> io::Result<()> {
            data_out.write_all(self.data.as_slice())?;
            meta_out.write_all(self.meta.as_slice())?;
            Ok(())
        })();

        if let Err(e) = result {
            error!(error = %e, "failed to flush segment; partial output is not a valid index input");
            return Err(DocValuesError::Framing(e));
        }

        info!(
            fields = self.fields_written,
            data_bytes = self.data.len(),
            meta_bytes = self.meta.len(),
            "doc-values writer closed"
        );
        self.closed = true;
        Ok(())
    }
}

impl Drop for DocValuesWriter {
    fn drop(&mut self) {
        if !self.closed && self.fields_written > 0 {
            error!("DocValuesWriter dropped without calling close(); segment is incomplete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{VecBinaryValues, VecDocValues, VecSortedSetValues, VecTerms};

    #[test]
    fn close_without_fields_writes_only_framing_and_sentinel() {
        let writer = DocValuesWriter::new(0, b"seg".to_vec(), DocValuesWriterConfig::default());
        let mut data_out = Vec::new();
        let mut meta_out = Vec::new();
        writer.close(&mut data_out, &mut meta_out).unwrap();
        assert!(!data_out.is_empty()); // header + trailer
        assert!(!meta_out.is_empty()); // header + sentinel + trailer
    }

    #[test]
    fn numeric_field_round_trips_through_close() {
        let mut writer = DocValuesWriter::new(4, b"seg".to_vec(), DocValuesWriterConfig::default());
        let field = VecDocValues::new(vec![(0, vec![10]), (1, vec![20]), (2, vec![30]), (3, vec![40])]);
        writer.add_numeric_field(0, &field).unwrap();
        let mut data_out = Vec::new();
        let mut meta_out = Vec::new();
        writer.close(&mut data_out, &mut meta_out).unwrap();
        assert!(!data_out.is_empty());
    }

    #[test]
    fn metadata_stream_ends_with_sentinel_before_trailer() {
        let mut writer = DocValuesWriter::new(1, b"seg".to_vec(), DocValuesWriterConfig::default());
        let field = VecDocValues::new(vec![(0, vec![7])]);
        writer.add_numeric_field(3, &field).unwrap();
        let mut data_out = Vec::new();
        let mut meta_out = Vec::new();
        writer.close(&mut data_out, &mut meta_out).unwrap();
        // Sentinel (-1 : i32) immediately precedes the 4-byte CRC trailer.
        let sentinel_off = meta_out.len() - 8;
        let sentinel = i32::from_be_bytes(meta_out[sentinel_off..sentinel_off + 4].try_into().unwrap());
        assert_eq!(sentinel, -1);
    }

    #[test]
    fn multiple_field_types_in_one_segment() {
        let mut writer = DocValuesWriter::new(3, b"seg".to_vec(), DocValuesWriterConfig::default());

        let numeric = VecDocValues::new(vec![(0, vec![1]), (1, vec![2]), (2, vec![3])]);
        writer.add_numeric_field(0, &numeric).unwrap();

        let binary = VecBinaryValues::new(vec![(0, b"a".to_vec()), (1, b"bb".to_vec()), (2, b"ccc".to_vec())]);
        writer.add_binary_field(1, &binary).unwrap();

        let mut term_bytes: Vec<Vec<u8>> = vec![b"apple".to_vec(), b"banana".to_vec(), b"cherry".to_vec()];
        term_bytes.sort();
        let terms = VecTerms::new(term_bytes);
        let sorted_values = VecBinaryValues::new(vec![
            (0, b"banana".to_vec()),
            (1, b"apple".to_vec()),
            (2, b"cherry".to_vec()),
        ]);
        writer.add_sorted_field(2, &terms, &sorted_values).unwrap();

        let sorted_numeric = VecDocValues::new(vec![(0, vec![1, 2]), (1, vec![3]), (2, vec![])]);
        writer.add_sorted_numeric_field(3, &sorted_numeric).unwrap();

        let set_terms = VecTerms::new({
            let mut v = vec![b"x".to_vec(), b"y".to_vec(), b"z".to_vec()];
            v.sort();
            v
        });
        let set_values = VecSortedSetValues::new(vec![
            (0, vec![b"x".to_vec(), b"z".to_vec()]),
            (1, vec![b"y".to_vec()]),
        ]);
        writer.add_sorted_set_field(4, &set_terms, &set_values).unwrap();

        let mut data_out = Vec::new();
        let mut meta_out = Vec::new();
        writer.close(&mut data_out, &mut meta_out).unwrap();
        assert!(!data_out.is_empty());
        assert!(!meta_out.is_empty());
    }

    #[test]
    fn ordinal_invariant_violation_propagates_as_internal_error() {
        let mut writer = DocValuesWriter::new(2, b"seg".to_vec(), DocValuesWriterConfig::default());
        // A caller-supplied ordinal stream with a nonzero min is a bug.
        let malformed = VecDocValues::new(vec![(0, vec![5]), (1, vec![6])]);
        let terms = VecTerms::new(vec![b"a".to_vec()]);
        let values = VecBinaryValues::new(vec![(0, b"a".to_vec())]);
        // Use the numeric path directly to exercise the assertion without
        // constructing an inconsistent Sorted field.
        let result = encode_numeric(
            &mut ByteSink::new(),
            &mut ByteSink::new(),
            &malformed,
            2,
            &DocValuesWriterConfig::default(),
            true,
        );
        assert!(matches!(result, Err(DocValuesError::Internal(_))));
        // Writer itself stays usable for well-formed fields afterward.
        writer.add_sorted_field(0, &terms, &values).unwrap();
        let mut data_out = Vec::new();
        let mut meta_out = Vec::new();
        writer.close(&mut data_out, &mut meta_out).unwrap();
    }
}
