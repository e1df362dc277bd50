//! Segment framing stand-in (§1: segment file creation and
//! checksum/header framing are external collaborators; reimplemented
//! here, minimally, so the crate is self-contained end to end).
//!
//! A small magic/version header, and a trailing CRC32 computed over
//! every byte the stream carries. Both `data` and `meta` get their own
//! header and trailer (§3 "Output streams", §6 "Endianness").

use crc32fast::Hasher as Crc32;

use crate::output::ByteSink;

const CODEC_MAGIC: [u8; 4] = *b"DVC1";
const CODEC_VERSION: i32 = 1;

/// Write the codec-name/version/segment-id header a stream begins with.
pub fn write_header(sink: &mut ByteSink, segment_id: &[u8]) {
    sink.write_bytes(&CODEC_MAGIC);
    sink.write_i32(CODEC_VERSION);
    sink.write_vint(segment_id.len() as u32);
    sink.write_bytes(segment_id);
}

/// Append the CRC32 trailer computed over every byte written to `sink`
/// so far (header, field payloads, and — for `meta` — the `-1` sentinel,
/// which must already have been written).
pub fn write_trailer(sink: &mut ByteSink) {
    let mut hasher = Crc32::new();
    hasher.update(sink.as_slice());
    let checksum = hasher.finalize();
    sink.write_i32(checksum as i32);
}
