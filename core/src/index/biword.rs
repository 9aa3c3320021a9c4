use super::{complement, intersect, union, DocId, DocTable, Searchable};
use crate::document::Document;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
struct Inner {
    docs: DocTable,
    terms: HashMap<String, Vec<DocId>>,
    pairs: HashMap<(String, String), BTreeSet<DocId>>,
}

impl Inner {
    fn hits(&self, term: &str) -> Option<BTreeSet<DocId>> {
        self.terms.get(term).map(|p| p.iter().copied().collect())
    }

    fn pair(&self, first: &str, second: &str) -> Option<&BTreeSet<DocId>> {
        self.pairs.get(&(first.to_string(), second.to_string()))
    }
}

/// Double-word index: single-term postings plus a table of adjacent token pairs.
#[derive(Debug, Default)]
pub struct DoubleWordIndex {
    inner: RwLock<Inner>,
}

impl DoubleWordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term_count(&self) -> usize {
        self.inner.read().terms.len()
    }

    pub fn pair_count(&self) -> usize {
        self.inner.read().pairs.len()
    }

    pub fn search(&self, token: &str) -> Vec<DocId> {
        self.inner.read().terms.get(token).cloned().unwrap_or_default()
    }

    /// Documents where `first` is directly followed by `second`.
    ///
    /// When that exact pair was never indexed the reversed pair is tried, so
    /// "river bank" also matches documents that only contain "bank river".
    pub fn search_phrase(&self, first: &str, second: &str) -> BTreeSet<DocId> {
        let inner = self.inner.read();
        inner
            .pair(first, second)
            .or_else(|| inner.pair(second, first))
            .cloned()
            .unwrap_or_default()
    }
}

impl Searchable for DoubleWordIndex {
    type Hits = BTreeSet<DocId>;

    fn document_number(&self) -> usize {
        self.inner.read().docs.len()
    }

    fn add_collection(&self, document: &Document) -> DocId {
        let mut inner = self.inner.write();
        let doc_id = inner.docs.register(document.title());

        for term in document.unique_tokens() {
            inner.terms.entry(term.clone()).or_default().push(doc_id);
        }
        for window in document.tokens().windows(2) {
            inner
                .pairs
                .entry((window[0].clone(), window[1].clone()))
                .or_default()
                .insert(doc_id);
        }

        tracing::debug!(doc_id, title = document.title(), pairs = inner.pairs.len(), "bigrams added");
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
