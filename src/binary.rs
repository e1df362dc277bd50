//! Binary value encoder (§4.4).
//!
//! A binary field stores at most one raw byte string per doc. Values are
//! concatenated back-to-back into `data`; the reader recovers each doc's
//! slice either by multiplying a fixed length (the common case: every doc
//! contributes the same number of bytes, e.g. a fixed-width packed key) or
//! by consulting a monotonic address table of cumulative offsets.

use tracing::trace;

use crate::cursor::BinaryValuesCursorFactory;
use crate::monotonic::write_monotonic;
use crate::output::ByteSink;
use crate::presence::write_presence_descriptor;

/// Encode one binary doc-values stream, per the §6 binary payload layout:
/// `dataOffset, dataLength, presence(4), docsWithField, minLength,
/// maxLength`, then, only when lengths vary, an `addrStart` marker, the
/// monotonic address table itself, and `addrLength`.
pub fn encode_binary<F>(data: &mut ByteSink, meta: &mut ByteSink, cursors: &F, max_doc: u32)
where
    F: BinaryValuesCursorFactory,
{
    let data_offset = data.position();
    let mut doc_ids: Vec<u32> = Vec::new();
    let mut lengths: Vec<u32> = Vec::new();

    let mut cursor = cursors.open();
    while let Some(doc) = cursor.next_doc() {
        let value = cursor.current_value();
        data.write_bytes(value);
        doc_ids.push(doc);
        lengths.push(value.len() as u32);
    }
    let data_length = data.position() - data_offset;

    meta.write_i64(data_offset as i64);
    meta.write_i64(data_length as i64);
    write_presence_descriptor(data, meta, &doc_ids, max_doc);

    let docs_with_field = doc_ids.len() as u32;
    let min_length = lengths.iter().copied().min().unwrap_or(0);
    let max_length = lengths.iter().copied().max().unwrap_or(0);

    meta.write_i32(docs_with_field as i32);
    meta.write_i32(min_length as i32);
    meta.write_i32(max_length as i32);

    if max_length > min_length {
        let mut cumulative: Vec<u64> = Vec::with_capacity(lengths.len() + 1);
        let mut running = 0u64;
        cumulative.push(running);
        for len in &lengths {
            running += *len as u64;
            cumulative.push(running);
        }

        let addr_start = data.position();
        meta.write_i64(addr_start as i64);
        let region = write_monotonic(data, meta, &cumulative, crate::monotonic::DEFAULT_BLOCK_SHIFT);
        meta.write_i64(region.addr_length as i64);
    }

    trace!(
        docs_with_field,
        min_length,
        max_length,
        data_bytes_written = data_length,
        "binary field encoded"
    );
}
