use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use termdex::{
    ingest, CoordinateInvertedIndex, DocId, Document, DoubleWordIndex, HitSet, IncidenceMatrix,
    InvertedIndex, Proximity, Searchable,
};

fn processed(title: &str, text: &str) -> Document {
    let mut doc = Document::new(title, text);
    doc.process().unwrap();
    doc
}

fn cat_and_dog() -> Vec<Document> {
    vec![processed("doc0", "the cat sat"), processed("doc1", "the dog sat")]
}

fn set(ids: &[DocId]) -> BTreeSet<DocId> {
    ids.iter().copied().collect()
}

#[test]
fn cat_and_dog_inverted() {
    let idx = InvertedIndex::new();
    assert_eq!(ingest(&idx, &cat_and_dog()), vec![0, 1]);

    assert_eq!(idx.bool_search("sat"), set(&[0, 1]));
    assert_eq!(idx.bool_search_and("cat", "dog"), set(&[]));
    assert_eq!(idx.bool_search_and("cat", "bird"), set(&[]));
    assert_eq!(idx.bool_search_or("cat", "dog"), set(&[0, 1]));
    assert_eq!(idx.bool_search_not("cat"), set(&[1]));
    assert_eq!(idx.title(1).as_deref(), Some("doc1"));
}

#[test]
fn cat_and_dog_coordinate() {
    let idx = CoordinateInvertedIndex::new();
    ingest(&idx, &cat_and_dog());

    let hits = idx.search_phrase("the", "sat");
    assert_eq!(hits[&0], vec![Proximity { left: 0, right: 2, distance: 2 }]);
    assert_eq!(hits[&1], vec![Proximity { left: 0, right: 2, distance: 2 }]);
    assert_eq!(idx.bool_search("cat"), set(&[0]));
}

#[test]
fn cat_and_dog_incidence_and_biword() {
    let matrix = IncidenceMatrix::new();
    ingest(&matrix, &cat_and_dog());
    assert_eq!(matrix.bool_search("sat").doc_ids(), vec![0, 1]);
    assert_eq!(matrix.bool_search_not("dog").doc_ids(), vec![0]);
    assert_eq!(matrix.term_count(), 4);

    let biword = DoubleWordIndex::new();
    ingest(&biword, &cat_and_dog());
    assert_eq!(biword.search_phrase("cat", "sat"), set(&[0]));
    assert_eq!(biword.search_phrase("sat", "dog"), set(&[1]));
    assert_eq!(biword.bool_search_or("cat", "dog"), set(&[0, 1]));
}

#[test]
fn empty_indexes_answer_with_empty_values() {
    let matrix = IncidenceMatrix::new();
    assert_eq!(matrix.document_number(), 0);
    assert!(matrix.bool_search("x").is_empty());
    assert!(matrix.bool_search_not("x").is_empty());
    assert!(matrix.bool_search_and("x", "y").is_empty());

    let inverted = InvertedIndex::new();
    assert!(inverted.bool_search("x").is_empty());
    assert!(inverted.bool_search_not("x").is_empty());
    assert!(inverted.bool_search_or("x", "y").is_empty());

    let biword = DoubleWordIndex::new();
    assert!(biword.search("x").is_empty());
    assert!(biword.search_phrase("x", "y").is_empty());

    let coordinate = CoordinateInvertedIndex::new();
    assert!(coordinate.search("x").is_empty());
    assert!(coordinate.search_phrase("x", "y").is_empty());
    assert_eq!(coordinate.document_number(), 0);
}

#[test]
fn identical_documents_get_distinct_ids() {
    let idx = InvertedIndex::new();
    let doc = processed("same.txt", "repeat me");
    assert_eq!(idx.add_collection(&doc), 0);
    assert_eq!(idx.add_collection(&doc), 1);
    assert_eq!(idx.document_number(), 2);
    assert_eq!(idx.bool_search("repeat"), set(&[0, 1]));
    assert_eq!(idx.postings()["repeat"], vec![0, 1]);
}

#[test]
fn concurrent_ingestion_keeps_ids_dense() {
    let matrix = Arc::new(IncidenceMatrix::new());
    let inverted = Arc::new(InvertedIndex::new());

    let workers: Vec<_> = (0..4)
        .map(|w| {
            let matrix = Arc::clone(&matrix);
            let inverted = Arc::clone(&inverted);
            thread::spawn(move || {
                for i in 0..25 {
                    let doc = processed(&format!("w{w}-{i}"), &format!("shared worker{w} item{i}"));
                    matrix.add_collection(&doc);
                    inverted.add_collection(&doc);
                    let rows = matrix.rows();
                    let width = rows["shared"].len();
                    assert!(rows.values().all(|row| row.len() == width));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(matrix.document_number(), 100);
    assert_eq!(inverted.document_number(), 100);
    assert_eq!(inverted.bool_search("shared"), (0..100).collect::<BTreeSet<_>>());
    assert_eq!(matrix.bool_search("shared").doc_ids(), (0..100).collect::<Vec<_>>());
    assert_eq!(inverted.bool_search("worker2").len(), 25);
    assert!(matrix.rows().values().all(|row| row.len() == 100));
}
