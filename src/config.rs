//! Tunable writer configuration (§4.0).
//!
//! These constants govern the three block-size trade-offs the codec
//! makes (numeric block granularity, term-dictionary LZ4 block size,
//! reverse-index group size) plus the dictionary-encoding cap and the
//! scratch buffer's starting capacity. The defaults match the historical
//! constants the format was designed around; changing them changes the
//! bytes written, so any non-default configuration is a new wire format.

/// Configuration for a [`crate::writer::DocValuesWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocValuesWriterConfig {
    /// `log2` of the numeric block-mode block size (§4.1, §4.2). Default
    /// `14` → blocks of `16384` values.
    pub numeric_block_shift: u8,

    /// `log2` of the term-dictionary LZ4 block size (§4.6). Default `5`
    /// → blocks of `32` terms.
    pub terms_dict_block_shift: u8,

    /// `log2` of the reverse-index group size (§4.8). Default `10` →
    /// groups of `1024` terms.
    pub terms_dict_reverse_index_shift: u8,

    /// Maximum number of distinct values tracked before the
    /// dictionary-encoding path is disabled for a field (§4.1). Default
    /// `256`.
    pub max_distinct_for_dictionary: usize,

    /// Initial capacity, in bytes, of the term-dictionary scratch buffer
    /// (§5). Default `16 KiB`; grows geometrically as needed.
    pub dictionary_buffer_initial_capacity: usize,
}

impl Default for DocValuesWriterConfig {
    fn default() -> Self {
        Self {
            numeric_block_shift: 14,
            terms_dict_block_shift: 5,
            terms_dict_reverse_index_shift: 10,
            max_distinct_for_dictionary: 256,
            dictionary_buffer_initial_capacity: 16 * 1024,
        }
    }
}

impl DocValuesWriterConfig {
    /// Numeric block-mode block size in values (`1 << numeric_block_shift`).
    pub fn numeric_block_size(&self) -> usize {
        1 << self.numeric_block_shift
    }

    /// Term-dictionary LZ4 block size in terms.
    pub fn terms_dict_block_size(&self) -> usize {
        1 << self.terms_dict_block_shift
    }

    /// Reverse-index group size in terms.
    pub fn terms_dict_reverse_index_group_size(&self) -> usize {
        1 << self.terms_dict_reverse_index_shift
    }
}
