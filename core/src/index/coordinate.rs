use super::{checked_u32, complement, intersect, union, DocId, DocTable, Searchable};
use crate::document::Document;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Default proximity window: positions must be strictly closer than this.
pub const CLOSE_WORDS: u32 = 5;

/// One co-occurrence of two query terms inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Proximity {
    pub left: u32,
    pub right: u32,
    pub distance: u32,
}

#[derive(Debug, Default)]
struct Inner {
    docs: DocTable,
    positions: HashMap<String, BTreeMap<DocId, Vec<u32>>>,
}

impl Inner {
    fn hits(&self, term: &str) -> Option<BTreeSet<DocId>> {
        self.positions.get(term).map(|docs| docs.keys().copied().collect())
    }
}

/// Positional inverted index: term -> doc -> token positions.
#[derive(Debug)]
pub struct CoordinateInvertedIndex {
    window: u32,
    inner: RwLock<Inner>,
}

impl Default for CoordinateInvertedIndex {
    fn default() -> Self {
        Self::with_window(CLOSE_WORDS)
    }
}

impl CoordinateInvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(window: u32) -> Self {
        Self { window, inner: RwLock::new(Inner::default()) }
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn term_count(&self) -> usize {
        self.inner.read().positions.len()
    }

    pub fn search(&self, token: &str) -> BTreeMap<DocId, Vec<u32>> {
        self.inner.read().positions.get(token).cloned().unwrap_or_default()
    }

    /// Position pairs of `left` and `right` that lie within the window, per document.
    ///
    /// Only documents containing both terms appear; such a document maps to an empty
    /// list when none of its pairs is close enough. Each list is ordered by distance,
    /// ties keeping `left`-major scan order. Every pair of positions is compared, so
    /// the cost is quadratic in per-document occurrence counts.
    pub fn search_phrase(&self, left: &str, right: &str) -> BTreeMap<DocId, Vec<Proximity>> {
        let inner = self.inner.read();
        let (Some(lhs), Some(rhs)) = (inner.positions.get(left), inner.positions.get(right)) else {
            return BTreeMap::new();
        };

        let mut results = BTreeMap::new();
        for (doc_id, left_positions) in lhs {
            let Some(right_positions) = rhs.get(doc_id) else { continue };
            let mut matches: Vec<Proximity> = left_positions
                .iter()
                .flat_map(|&a| right_positions.iter().map(move |&b| (a, b)))
                .filter_map(|(a, b)| {
                    let distance = a.abs_diff(b);
                    (distance < self.window).then_some(Proximity { left: a, right: b, distance })
                })
                .collect();
            matches.sort_by_key(|p| p.distance);
            results.insert(*doc_id, matches);
        }
        tracing::trace!(left, right, docs = results.len(), "proximity search");
        results
    }
}

impl Searchable for CoordinateInvertedIndex {
    type Hits = BTreeSet<DocId>;

    fn document_number(&self) -> usize {
        self.inner.read().docs.len()
    }

    fn add_collection(&self, document: &Document) -> DocId {
        let mut inner = self.inner.write();
        let doc_id = inner.docs.register(document.title());
        for (pos, term) in document.tokens().iter().enumerate() {
            inner
                .positions
                .entry(term.clone())
                .or_default()
                .entry(doc_id)
                .or_default()
                .push(checked_u32(pos, "token position"));
        }
        tracing::debug!(doc_id, title = document.title(), tokens = document.tokens().len(), "positions recorded");
        doc_id
    }

    fn title(&self, doc_id: DocId) -> Option<String> {
        self.inner.read().docs.title(doc_id).map(str::to_string)
    }

    fn bool_search(&self, term: &str) -> BTreeSet<DocId> {
        self.inner.read().hits(term).unwrap_or_default()
    }

    fn bool_search_not(&self, term: &str) -> BTreeSet<DocId> {
        let inner = self.inner.read();
        complement(&inner.docs, inner.hits(term))
    }

    fn bool_search_and(&self, left: &str, right: &str) -> BTreeSet<DocId> {
        let inner = self.inner.read();
        intersect(inner.hits(left), inner.hits(right))
    }

    fn bool_search_or(&self, left: &str, right: &str) -> BTreeSet<DocId> {
        let inner = self.inner.read();
        union(inner.hits(left), inner.hits(right))
    }
}
