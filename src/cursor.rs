//! Input capability traits (§3, §9: "dynamic polymorphism at the cursor
//! boundary").
//!
//! The writer never owns the indexing pipeline's per-document data; it is
//! handed a small capability object for each field and drives it forward.
//! The statistics tracker (§4.1) requires a *second*, independent pass
//! over the same logical data before the data-writing pass, so both
//! traits are paired with a factory that can mint a fresh cursor on
//! demand rather than being consumed once.

/// A forward-only, per-field view over `(docId, values[])` pairs.
///
/// `doc_id` is strictly increasing across calls to [`next_doc`]. Once
/// positioned on a doc, [`value_count`] reports how many values that doc
/// has, and [`next_value`] must be called exactly that many times before
/// advancing to the next doc.
///
/// [`next_doc`]: DocValuesCursor::next_doc
/// [`value_count`]: DocValuesCursor::value_count
/// [`next_value`]: DocValuesCursor::next_value
pub trait DocValuesCursor {
    /// Advance to the next doc with at least one value, returning its id,
    /// or `None` when exhausted.
    fn next_doc(&mut self) -> Option<u32>;

    /// Number of values the current doc carries. Only valid after a
    /// successful [`next_doc`](Self::next_doc) call.
    fn value_count(&self) -> u32;

    /// Consume the next value of the current doc.
    fn next_value(&mut self) -> i64;

    /// Total number of values this cursor will yield across all docs.
    fn cost(&self) -> u64;
}

/// Mints fresh, independent [`DocValuesCursor`] instances so the writer
/// can take a statistics pass and a data pass without assuming the
/// underlying source is replayable in place.
pub trait DocValuesCursorFactory {
    type Cursor<'a>: DocValuesCursor
    where
        Self: 'a;

    fn open(&self) -> Self::Cursor<'_>;
}

/// A forward-only iterator over a field's sorted, distinct term set.
/// Ordinals are assigned implicitly as `0, 1, 2, ...` in iteration order.
pub trait TermsCursor {
    /// The next term in ascending byte order, or `None` when exhausted.
    fn next_term(&mut self) -> Option<Vec<u8>>;
}

/// Mints fresh [`TermsCursor`] instances, used when the term-dictionary
/// encoder needs more than one pass (e.g. to size the scratch buffer
/// before emitting blocks) and the caller cannot otherwise guarantee the
/// term count up front.
pub trait TermsCursorFactory {
    type Cursor<'a>: TermsCursor
    where
        Self: 'a;

    fn open(&self) -> Self::Cursor<'_>;
}

/// A [`DocValuesCursorFactory`] backed by an in-memory `(doc_id, values)`
/// table, used throughout this crate's own test suite and benchmarks, and
/// a convenient adapter for callers who already materialize values.
#[derive(Debug, Clone, Default)]
pub struct VecDocValues {
    docs: Vec<(u32, Vec<i64>)>,
}

impl VecDocValues {
    pub fn new(docs: Vec<(u32, Vec<i64>)>) -> Self {
        Self { docs }
    }

    pub fn cost(&self) -> u64 {
        self.docs.iter().map(|(_, v)| v.len() as u64).sum()
    }
}

pub struct VecDocValuesCursor<'a> {
    docs: &'a [(u32, Vec<i64>)],
    doc_idx: usize,
    value_idx: usize,
    cost: u64,
}

impl DocValuesCursorFactory for VecDocValues {
    type Cursor<'a> = VecDocValuesCursor<'a>;

    fn open(&self) -> VecDocValuesCursor<'_> {
        VecDocValuesCursor {
            docs: &self.docs,
            doc_idx: 0,
            value_idx: 0,
            cost: self.cost(),
        }
    }
}

impl<'a> DocValuesCursor for VecDocValuesCursor<'a> {
    fn next_doc(&mut self) -> Option<u32> {
        if self.doc_idx >= self.docs.len() {
            return None;
        }
        let (doc_id, _) = self.docs[self.doc_idx];
        self.value_idx = 0;
        self.doc_idx += 1;
        Some(doc_id)
    }

    fn value_count(&self) -> u32 {
        self.docs[self.doc_idx - 1].1.len() as u32
    }

    fn next_value(&mut self) -> i64 {
        let v = self.docs[self.doc_idx - 1].1[self.value_idx];
        self.value_idx += 1;
        v
    }

    fn cost(&self) -> u64 {
        self.cost
    }
}

/// A forward-only, per-field view over `(docId, bytes)` pairs, used by the
/// binary encoder (§4.4). Unlike [`DocValuesCursor`], a binary field has at
/// most one value per doc.
pub trait BinaryValuesCursor {
    /// Advance to the next doc with a value, returning its id, or `None`
    /// when exhausted.
    fn next_doc(&mut self) -> Option<u32>;

    /// The current doc's value. Only valid after a successful
    /// [`next_doc`](Self::next_doc) call.
    fn current_value(&self) -> &[u8];
}

/// Mints fresh [`BinaryValuesCursor`] instances for the binary encoder's
/// two passes (sizing, then data).
pub trait BinaryValuesCursorFactory {
    type Cursor<'a>: BinaryValuesCursor
    where
        Self: 'a;

    fn open(&self) -> Self::Cursor<'_>;
}

/// A [`BinaryValuesCursorFactory`] backed by an in-memory `(doc_id, bytes)`
/// table.
#[derive(Debug, Clone, Default)]
pub struct VecBinaryValues {
    docs: Vec<(u32, Vec<u8>)>,
}

impl VecBinaryValues {
    pub fn new(docs: Vec<(u32, Vec<u8>)>) -> Self {
        Self { docs }
    }
}

pub struct VecBinaryValuesCursor<'a> {
    docs: &'a [(u32, Vec<u8>)],
    idx: usize,
}

impl BinaryValuesCursorFactory for VecBinaryValues {
    type Cursor<'a> = VecBinaryValuesCursor<'a>;

    fn open(&self) -> VecBinaryValuesCursor<'_> {
        VecBinaryValuesCursor {
            docs: &self.docs,
            idx: 0,
        }
    }
}

impl<'a> BinaryValuesCursor for VecBinaryValuesCursor<'a> {
    fn next_doc(&mut self) -> Option<u32> {
        if self.idx >= self.docs.len() {
            return None;
        }
        let doc_id = self.docs[self.idx].0;
        self.idx += 1;
        Some(doc_id)
    }

    fn current_value(&self) -> &[u8] {
        &self.docs[self.idx - 1].1
    }
}

/// A [`TermsCursorFactory`] backed by an in-memory sorted term list.
#[derive(Debug, Clone, Default)]
pub struct VecTerms {
    terms: Vec<Vec<u8>>,
}

impl VecTerms {
    /// `terms` must already be sorted and distinct.
    pub fn new(terms: Vec<Vec<u8>>) -> Self {
        debug_assert!(terms.windows(2).all(|w| w[0] < w[1]));
        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

pub struct VecTermsCursor<'a> {
    terms: &'a [Vec<u8>],
    idx: usize,
}

impl TermsCursorFactory for VecTerms {
    type Cursor<'a> = VecTermsCursor<'a>;

    fn open(&self) -> VecTermsCursor<'_> {
        VecTermsCursor {
            terms: &self.terms,
            idx: 0,
        }
    }
}

impl<'a> TermsCursor for VecTermsCursor<'a> {
    fn next_term(&mut self) -> Option<Vec<u8>> {
        let t = self.terms.get(self.idx)?.clone();
        self.idx += 1;
        Some(t)
    }
}

/// A forward-only, per-field view over `(docId, terms[])` pairs feeding
/// the Sorted/SortedSet encoder (§4.5) *before* ordinal resolution:
/// `terms[]` are raw byte strings, already sorted ascending and distinct
/// within the doc, exactly like [`DocValuesCursor`] but yielding bytes
/// instead of `i64`. Sorted fields use this with at most one value per
/// doc; SortedSet fields may yield any number.
pub trait SortedSetValuesCursor {
    /// Advance to the next doc with at least one term, returning its id,
    /// or `None` when exhausted.
    fn next_doc(&mut self) -> Option<u32>;

    /// Number of terms the current doc carries.
    fn value_count(&self) -> u32;

    /// Consume the next term of the current doc.
    fn next_value(&mut self) -> Vec<u8>;
}

/// Mints fresh [`SortedSetValuesCursor`] instances for the two-pass
/// single-valued detection (§4.5) followed by the encode pass.
pub trait SortedSetValuesCursorFactory {
    type Cursor<'a>: SortedSetValuesCursor
    where
        Self: 'a;

    fn open(&self) -> Self::Cursor<'_>;
}

/// A [`SortedSetValuesCursorFactory`] backed by an in-memory
/// `(doc_id, terms)` table.
#[derive(Debug, Clone, Default)]
pub struct VecSortedSetValues {
    docs: Vec<(u32, Vec<Vec<u8>>)>,
}

impl VecSortedSetValues {
    /// Each doc's terms must already be sorted ascending and distinct.
    pub fn new(docs: Vec<(u32, Vec<Vec<u8>>)>) -> Self {
        Self { docs }
    }
}

pub struct VecSortedSetValuesCursor<'a> {
    docs: &'a [(u32, Vec<Vec<u8>>)],
    doc_idx: usize,
    value_idx: usize,
}

impl SortedSetValuesCursorFactory for VecSortedSetValues {
    type Cursor<'a> = VecSortedSetValuesCursor<'a>;

    fn open(&self) -> VecSortedSetValuesCursor<'_> {
        VecSortedSetValuesCursor {
            docs: &self.docs,
            doc_idx: 0,
            value_idx: 0,
        }
    }
}

impl<'a> SortedSetValuesCursor for VecSortedSetValuesCursor<'a> {
    fn next_doc(&mut self) -> Option<u32> {
        if self.doc_idx >= self.docs.len() {
            return None;
        }
        let (doc_id, _) = self.docs[self.doc_idx];
        self.value_idx = 0;
        self.doc_idx += 1;
        Some(doc_id)
    }

    fn value_count(&self) -> u32 {
        self.docs[self.doc_idx - 1].1.len() as u32
    }

    fn next_value(&mut self) -> Vec<u8> {
        let v = self.docs[self.doc_idx - 1].1[self.value_idx].clone();
        self.value_idx += 1;
        v
    }
}
