//! In-memory index variants over processed documents.
//!
//! Every variant keeps its documents table and term tables behind a single `RwLock`.
//! `add_collection` holds the write lock for the whole ingestion, so the doc id
//! assignment and the table updates for that document become visible together.

use crate::document::Document;
use bit_vec::BitVec;
use std::collections::BTreeSet;

pub mod biword;
pub mod coordinate;
pub mod incidence;
pub mod inverted;

pub type DocId = u32;

/// The capability shared by every index variant.
pub trait Searchable: Send + Sync {
    type Hits: HitSet;

    fn document_number(&self) -> usize;

    /// Register `document` under a fresh doc id and fold its tokens into the index.
    ///
    /// Panics once the index would exceed `u32::MAX` documents, or a document `u32::MAX` tokens.
    fn add_collection(&self, document: &Document) -> DocId;

    fn title(&self, doc_id: DocId) -> Option<String>;

    fn bool_search(&self, term: &str) -> Self::Hits;

    fn bool_search_not(&self, term: &str) -> Self::Hits;

    /// Empty when either term is absent from the index.
    fn bool_search_and(&self, left: &str, right: &str) -> Self::Hits;

    /// Empty when either term is absent from the index.
    fn bool_search_or(&self, left: &str, right: &str) -> Self::Hits;
}

/// A query result that can be listed as matching doc ids, ascending.
pub trait HitSet {
    fn doc_ids(&self) -> Vec<DocId>;
}

impl HitSet for BitVec {
    fn doc_ids(&self) -> Vec<DocId> {
        self.iter()
            .enumerate()
            .filter(|(_, bit)| *bit)
            .map(|(i, _)| checked_u32(i, "doc id"))
            .collect()
    }
}

impl HitSet for BTreeSet<DocId> {
    fn doc_ids(&self) -> Vec<DocId> {
        self.iter().copied().collect()
    }
}

/// Fold every document into `index` in iteration order, returning the assigned ids.
pub fn ingest<'a, S, I>(index: &S, documents: I) -> Vec<DocId>
where
    S: Searchable + ?Sized,
    I: IntoIterator<Item = &'a Document>,
{
    documents
        .into_iter()
        .map(|doc| index.add_collection(doc))
        .collect()
}

/// Append-only `DocId -> title` table. Ids are dense and follow insertion order.
#[derive(Debug, Default, Clone)]
pub(crate) struct DocTable {
    titles: Vec<String>,
}

impl DocTable {
    pub(crate) fn register(&mut self, title: &str) -> DocId {
        let doc_id = checked_u32(self.titles.len(), "doc id");
        self.titles.push(title.to_string());
        doc_id
    }

    pub(crate) fn len(&self) -> usize {
        self.titles.len()
    }

    pub(crate) fn title(&self, doc_id: DocId) -> Option<&str> {
        self.titles.get(doc_id as usize).map(String::as_str)
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = DocId> {
        0..checked_u32(self.titles.len(), "doc id")
    }
}

/// Doc ids and token positions are stored as `u32`; running past that is a capacity bug.
pub(crate) fn checked_u32(n: usize, what: &str) -> u32 {
    u32::try_from(n).unwrap_or_else(|_| panic!("{what} {n} does not fit in u32"))
}

/// Set semantics shared by the postings-based variants: absent operands short-circuit to empty.
pub(crate) fn intersect(left: Option<BTreeSet<DocId>>, right: Option<BTreeSet<DocId>>) -> BTreeSet<DocId> {
    match (left, right) {
        (Some(l), Some(r)) => l.intersection(&r).copied().collect(),
        _ => BTreeSet::new(),
    }
}

pub(crate) fn union(left: Option<BTreeSet<DocId>>, right: Option<BTreeSet<DocId>>) -> BTreeSet<DocId> {
    match (left, right) {
        (Some(l), Some(r)) => l.union(&r).copied().collect(),
        _ => BTreeSet::new(),
    }
}

pub(crate) fn complement(docs: &DocTable, hits: Option<BTreeSet<DocId>>) -> BTreeSet<DocId> {
    let hits = hits.unwrap_or_default();
    docs.ids().filter(|id| !hits.contains(id)).collect()
}
