use super::{complement, intersect, union, DocId, DocTable, Searchable};
use crate::document::Document;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
struct Inner {
    docs: DocTable,
    postings: HashMap<String, Vec<DocId>>,
}

impl Inner {
    fn hits(&self, term: &str) -> Option<BTreeSet<DocId>> {
        self.postings.get(term).map(|p| p.iter().copied().collect())
    }
}

/// Term to postings list index.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    inner: RwLock<Inner>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term_count(&self) -> usize {
        self.inner.read().postings.len()
    }

    /// Snapshot of the postings table. Lists are in ingestion order.
    pub fn postings(&self) -> HashMap<String, Vec<DocId>> {
        self.inner.read().postings.clone()
    }
}

impl Searchable for InvertedIndex {
    type Hits = BTreeSet<DocId>;

    fn document_number(&self) -> usize {
        self.inner.read().docs.len()
    }

    fn add_collection(&self, document: &Document) -> DocId {
        let mut inner = self.inner.write();
        let doc_id = inner.docs.register(document.title());
        for term in document.unique_tokens() {
            inner.postings.entry(term.clone()).or_default().push(doc_id);
        }
        tracing::debug!(doc_id, title = document.title(), terms = document.unique_tokens().len(), "postings appended");
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
