//! Sorted / SortedSet encoder (§4.5).
//!
//! Both field types store a set of distinct byte-string terms via the
//! term-dictionary encoder (§4.6) and a per-doc ordinal stream via the
//! numeric encoder (§4.2), with ordinal `i` referring to the `i`-th term
//! in ascending byte order. The dispatcher here resolves each doc's raw
//! term bytes to an ordinal (by binary-searching the collected, sorted
//! term list — the same technique the numeric encoder's own dictionary
//! mode uses for its value table) and feeds the result through the
//! ordinal-marked numeric pipeline before emitting the dictionary.
//!
//! SortedSet additionally distinguishes single- from multi-valued docs
//! (§4.5): a single-valued SortedSet field degenerates to the Sorted
//! pipeline; a genuinely multi-valued one reuses the SortedNumeric tail
//! (§4.7) to recover per-doc value counts.

use crate::config::DocValuesWriterConfig;
use crate::cursor::{
    BinaryValuesCursor, BinaryValuesCursorFactory, DocValuesCursor, DocValuesCursorFactory,
    SortedSetValuesCursor, SortedSetValuesCursorFactory, TermsCursor, TermsCursorFactory,
};
use crate::error::Result;
use crate::numeric::{encode_numeric, encode_sorted_numeric};
use crate::output::ByteSink;
use crate::termdict::encode_term_dict;

fn collect_terms<F: TermsCursorFactory>(terms: &F) -> Vec<Vec<u8>> {
    let mut cursor = terms.open();
    let mut out = Vec::new();
    while let Some(term) = cursor.next_term() {
        out.push(term);
    }
    out
}

fn resolve_ordinal(terms: &[Vec<u8>], term: &[u8]) -> i64 {
    terms
        .binary_search_by(|t| t.as_slice().cmp(term))
        .expect("term observed in values cursor must appear in the term dictionary's term list") as i64
}

/// Encode a Sorted field: one ordinal per doc, plus the term dictionary.
pub fn write_sorted_field<TF, VF>(
    data: &mut ByteSink,
    meta: &mut ByteSink,
    terms: &TF,
    values: &VF,
    max_doc: u32,
    config: &DocValuesWriterConfig,
) -> Result<()>
where
    TF: TermsCursorFactory,
    VF: BinaryValuesCursorFactory,
{
    let all_terms = collect_terms(terms);
    let doc_count = {
        let mut cursor = values.open();
        let mut n = 0u64;
        while cursor.next_doc().is_some() {
            n += 1;
        }
        n
    };

    let ordinals = OrdinalsFromBinary {
        values,
        terms: &all_terms,
        cost: doc_count,
    };
    encode_numeric(data, meta, &ordinals, max_doc, config, true)?;
    encode_term_dict(data, meta, terms, config);
    Ok(())
}

/// Encode a SortedSet field: a `multiValued` byte, then either the
/// Sorted pipeline (single-valued, using each doc's one term) or the
/// SortedNumeric ordinal pipeline (multi-valued), then the term
/// dictionary.
pub fn write_sorted_set_field<TF, VF>(
    data: &mut ByteSink,
    meta: &mut ByteSink,
    terms: &TF,
    values: &VF,
    max_doc: u32,
    config: &DocValuesWriterConfig,
) -> Result<()>
where
    TF: TermsCursorFactory,
    VF: SortedSetValuesCursorFactory,
{
    let all_terms = collect_terms(terms);

    let (single_valued, doc_count, total_values) = {
        let mut cursor = values.open();
        let mut docs = 0u64;
        let mut total = 0u64;
        let mut single = true;
        while let Some(_doc) = cursor.next_doc() {
            docs += 1;
            let count = cursor.value_count();
            total += count as u64;
            if count > 1 {
                single = false;
            }
            for _ in 0..count {
                cursor.next_value();
            }
        }
        (single, docs, total)
    };

    if single_valued {
        meta.write_i8(0);
        let ordinals = OrdinalsFromSortedSetSingle {
            values,
            terms: &all_terms,
            cost: doc_count,
        };
        encode_numeric(data, meta, &ordinals, max_doc, config, true)?;
    } else {
        meta.write_i8(1);
        let ordinals = OrdinalsFromSortedSet {
            values,
            terms: &all_terms,
            cost: total_values,
        };
        encode_sorted_numeric(data, meta, &ordinals, max_doc, config, true)?;
    }

    encode_term_dict(data, meta, terms, config);
    Ok(())
}

/// Adapts a [`BinaryValuesCursorFactory`] (at most one raw term per doc,
/// as used by Sorted fields) into a [`DocValuesCursorFactory`] of
/// resolved ordinals.
struct OrdinalsFromBinary<'t, F> {
    values: &'t F,
    terms: &'t [Vec<u8>],
    cost: u64,
}

impl<'t, F: BinaryValuesCursorFactory> DocValuesCursorFactory for OrdinalsFromBinary<'t, F> {
    type Cursor<'a>
        = OrdinalsFromBinaryCursor<'a, F::Cursor<'a>>
    where
        Self: 'a;

    fn open(&self) -> Self::Cursor<'_> {
        OrdinalsFromBinaryCursor {
            inner: self.values.open(),
            terms: self.terms,
            cost: self.cost,
        }
    }
}

struct OrdinalsFromBinaryCursor<'a, C> {
    inner: C,
    terms: &'a [Vec<u8>],
    cost: u64,
}

impl<'a, C: BinaryValuesCursor> DocValuesCursor for OrdinalsFromBinaryCursor<'a, C> {
    fn next_doc(&mut self) -> Option<u32> {
        self.inner.next_doc()
    }

    fn value_count(&self) -> u32 {
        1
    }

    fn next_value(&mut self) -> i64 {
        resolve_ordinal(self.terms, self.inner.current_value())
    }

    fn cost(&self) -> u64 {
        self.cost
    }
}

/// Adapts a [`SortedSetValuesCursorFactory`] known to be single-valued
/// (at most one term per doc) into a [`DocValuesCursorFactory`] of
/// resolved ordinals — the SortedSet degenerate case that reuses the
/// Sorted pipeline.
struct OrdinalsFromSortedSetSingle<'t, F> {
    values: &'t F,
    terms: &'t [Vec<u8>],
    cost: u64,
}

impl<'t, F: SortedSetValuesCursorFactory> DocValuesCursorFactory for OrdinalsFromSortedSetSingle<'t, F> {
    type Cursor<'a>
        = OrdinalsFromSortedSetSingleCursor<'a, F::Cursor<'a>>
    where
        Self: 'a;

    fn open(&self) -> Self::Cursor<'_> {
        OrdinalsFromSortedSetSingleCursor {
            inner: self.values.open(),
            terms: self.terms,
            cost: self.cost,
        }
    }
}

struct OrdinalsFromSortedSetSingleCursor<'a, C> {
    inner: C,
    terms: &'a [Vec<u8>],
    cost: u64,
}

impl<'a, C: SortedSetValuesCursor> DocValuesCursor for OrdinalsFromSortedSetSingleCursor<'a, C> {
    fn next_doc(&mut self) -> Option<u32> {
        self.inner.next_doc()
    }

    fn value_count(&self) -> u32 {
        1
    }

    fn next_value(&mut self) -> i64 {
        let term = self.inner.next_value();
        resolve_ordinal(self.terms, &term)
    }

    fn cost(&self) -> u64 {
        self.cost
    }
}

/// Adapts a (possibly multi-valued) [`SortedSetValuesCursorFactory`]
/// into a [`DocValuesCursorFactory`] of resolved ordinals, one stream
/// entry per term, preserving per-doc value counts for the SortedNumeric
/// tail (§4.7).
struct OrdinalsFromSortedSet<'t, F> {
    values: &'t F,
    terms: &'t [Vec<u8>],
    cost: u64,
}

impl<'t, F: SortedSetValuesCursorFactory> DocValuesCursorFactory for OrdinalsFromSortedSet<'t, F> {
    type Cursor<'a>
        = OrdinalsFromSortedSetCursor<'a, F::Cursor<'a>>
    where
        Self: 'a;

    fn open(&self) -> Self::Cursor<'_> {
        OrdinalsFromSortedSetCursor {
            inner: self.values.open(),
            terms: self.terms,
            cost: self.cost,
        }
    }
}

struct OrdinalsFromSortedSetCursor<'a, C> {
    inner: C,
    terms: &'a [Vec<u8>],
    cost: u64,
}

impl<'a, C: SortedSetValuesCursor> DocValuesCursor for OrdinalsFromSortedSetCursor<'a, C> {
    fn next_doc(&mut self) -> Option<u32> {
        self.inner.next_doc()
    }

    fn value_count(&self) -> u32 {
        self.inner.value_count()
    }

    fn next_value(&mut self) -> i64 {
        let term = self.inner.next_value();
        resolve_ordinal(self.terms, &term)
    }

    fn cost(&self) -> u64 {
        self.cost
    }
}
