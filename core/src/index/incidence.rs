use super::{DocId, DocTable, Searchable};
use crate::document::Document;
use bit_vec::BitVec;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Inner {
    docs: DocTable,
    rows: HashMap<String, BitVec>,
}

/// Dense term-by-document boolean matrix.
///
/// Every row has exactly `document_number()` bits; rows only ever grow.
#[derive(Debug, Default)]
pub struct IncidenceMatrix {
    inner: RwLock<Inner>,
}

impl IncidenceMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term_count(&self) -> usize {
        self.inner.read().rows.len()
    }

    /// Snapshot of the whole matrix, keyed by term.
    pub fn rows(&self) -> HashMap<String, BitVec> {
        self.inner.read().rows.clone()
    }
}

impl Inner {
    fn zeros(&self) -> BitVec {
        BitVec::from_elem(self.docs.len(), false)
    }
}

impl Searchable for IncidenceMatrix {
    type Hits = BitVec;

    fn document_number(&self) -> usize {
        self.inner.read().docs.len()
    }

    fn add_collection(&self, document: &Document) -> DocId {
        let mut inner = self.inner.write();
        let doc_id = inner.docs.register(document.title());
        let prior = doc_id as usize;

        for row in inner.rows.values_mut() {
            row.push(false);
        }
        for term in document.unique_tokens() {
            match inner.rows.get_mut(term) {
                Some(row) => row.set(prior, true),
                None => {
                    let mut row = BitVec::from_elem(prior, false);
                    row.push(true);
                    inner.rows.insert(term.clone(), row);
                }
            }
        }

        tracing::debug!(doc_id, title = document.title(), terms = inner.rows.len(), "incidence row added");
        doc_id
    }

    fn title(&self, doc_id: DocId) -> Option<String> {
        self.inner.read().docs.title(doc_id).map(str::to_string)
    }

    fn bool_search(&self, term: &str) -> BitVec {
        let inner = self.inner.read();
        inner.rows.get(term).cloned().unwrap_or_else(|| inner.zeros())
    }

    fn bool_search_not(&self, term: &str) -> BitVec {
        let mut row = self.bool_search(term);
        row.negate();
        row
    }

    fn bool_search_and(&self, left: &str, right: &str) -> BitVec {
        let inner = self.inner.read();
        match (inner.rows.get(left), inner.rows.get(right)) {
            (Some(l), Some(r)) => {
                let mut row = l.clone();
                row.and(r);
                row
            }
            _ => inner.zeros(),
        }
    }

    fn bool_search_or(&self, left: &str, right: &str) -> BitVec {
        let inner = self.inner.read();
        match (inner.rows.get(left), inner.rows.get(right)) {
            (Some(l), Some(r)) => {
                let mut row = l.clone();
                row.or(r);
                row
            }
            _ => inner.zeros(),
        }
    }
}
