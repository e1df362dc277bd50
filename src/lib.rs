//! # doc-values-codec
//!
//! Write path for a columnar doc-values codec: the per-field, per-document
//! side data an inverted-index segment carries alongside its postings —
//! numeric, binary, sorted (single ordinal into a term dictionary),
//! sorted-numeric (multi-valued numeric), and sorted-set (multi-valued
//! ordinals) fields. Encoders choose the cheapest applicable on-disk
//! representation per field (constant, dictionary, delta/GCD-compressed,
//! or raw bit-packed blocks for numerics; LZ4-compressed, front-coded
//! blocks for term dictionaries) and emit two streams — `data` and
//! `meta` — that downstream segment readers mmap and random-access.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     DocValuesWriter                         │
//! │  ┌───────────┐ ┌──────────┐ ┌────────┐ ┌──────────────────┐ │
//! │  │  Numeric   │ │  Binary  │ │ Sorted │ │ SortedNumeric /  │ │
//! │  │ (4.2/4.7)  │ │  (4.4)   │ │ (4.5)  │ │   SortedSet      │ │
//! │  └─────┬──────┘ └────┬─────┘ └───┬────┘ └────────┬─────────┘ │
//! │        │             │           │               │          │
//! │        ▼             ▼           ▼               ▼          │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │   bitpacking · monotonic · presence · termdict       │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                          │                                  │
//! │                          ▼                                  │
//! │              framing (header + CRC32 trailer)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`writer`] | Field dispatcher — the crate's single public entry point |
//! | [`numeric`] | Numeric and SortedNumeric encoders (constant / dictionary / block / delta-GCD) |
//! | [`binary`] | Binary field encoder |
//! | [`sorted`] | Sorted / SortedSet ordinal resolution and dispatch |
//! | [`termdict`] | Front-coded, LZ4-compressed term dictionary with a sparse reverse index |
//! | [`bitpacking`] | Fixed-width bit packer shared by every block-structured encoding |
//! | [`monotonic`] | Block-packed monotonic sequence writer for address/offset tables |
//! | [`presence`] | Per-field doc-has-value bitmap (ALL / DENSE / SPARSE) |
//! | [`stats`] | Two-pass numeric statistics (GCD, distinct-value set, bit-width histogram) |
//! | [`framing`] | Segment header and CRC32 trailer |
//! | [`output`] | Append-only big-endian / vint byte sink shared by every encoder |
//! | [`cursor`] | Input capability traits the caller's indexing pipeline implements |
//! | [`config`] | Tunable block sizes and dictionary thresholds |
//! | [`error`] | Crate error hierarchy |
//!
//! ## Key Features
//!
//! - **Mode selection per field** — numeric fields silently take the
//!   cheapest representation that fits: a single stored constant, a
//!   capped ordinal dictionary, delta encoding with GCD factoring, or
//!   block-wise bit packing, never paying for generality a field's data
//!   doesn't need.
//! - **Two-pass cursors** — every input trait is backed by a factory
//!   that can mint a fresh, independent cursor, so a statistics pass can
//!   run ahead of the data-writing pass without buffering the field in
//!   memory.
//! - **LZ4-compressed term blocks** — the term dictionary front-codes
//!   shared prefixes within a block, then compresses the block against
//!   its own first term as dictionary, trading a small amount of seek
//!   granularity for meaningfully smaller postings-adjacent metadata.
//! - **CRC32-checked streams** — both `data` and `meta` carry a header
//!   and a whole-stream CRC32 trailer, so truncation or corruption is
//!   detected before a reader trusts any offset inside them.
//! - **Structured diagnostics** — encoding decisions (mode chosen, block
//!   counts, dictionary overflow) are emitted as `tracing` events rather
//!   than printed, so embedding applications can route them through
//!   their own subscriber.
//!
//! ## Quick Start
//!
//! ```rust
//! use doc_values_codec::config::DocValuesWriterConfig;
//! use doc_values_codec::cursor::{VecBinaryValues, VecDocValues, VecTerms};
//! use doc_values_codec::writer::DocValuesWriter;
//!
//! let mut writer = DocValuesWriter::new(3, b"segment_0".to_vec(), DocValuesWriterConfig::default());
//!
//! // field 0: numeric
//! let price = VecDocValues::new(vec![(0, vec![999]), (1, vec![450]), (2, vec![1200])]);
//! writer.add_numeric_field(0, &price).unwrap();
//!
//! // field 1: sorted (category, one ordinal per doc into a shared dictionary)
//! let mut terms = vec![b"books".to_vec(), b"electronics".to_vec(), b"toys".to_vec()];
//! terms.sort();
//! let category_terms = VecTerms::new(terms);
//! let category_values = VecBinaryValues::new(vec![
//!     (0, b"electronics".to_vec()),
//!     (1, b"books".to_vec()),
//!     (2, b"toys".to_vec()),
//! ]);
//! writer.add_sorted_field(1, &category_terms, &category_values).unwrap();
//!
//! let mut data_out = Vec::new();
//! let mut meta_out = Vec::new();
//! writer.close(&mut data_out, &mut meta_out).unwrap();
//! ```

#![allow(dead_code)]

pub mod binary;
pub mod bitpacking;
pub mod config;
pub mod cursor;
pub mod error;
pub mod framing;
pub mod monotonic;
pub mod numeric;
pub mod output;
pub mod presence;
pub mod sorted;
pub mod stats;
pub mod termdict;
pub mod writer;
