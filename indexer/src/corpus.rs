use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use termdex::Document;
use walkdir::WalkDir;

/// Regular files directly inside `dir`, sorted by path.
pub fn collection_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("corpus directory {} does not exist", dir.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Read and process every document of the corpus, in `collection_paths` order.
pub fn load_corpus(dir: &Path) -> Result<Vec<Document>> {
    let paths = collection_paths(dir)?;
    let docs = paths
        .par_iter()
        .map(|path| -> Result<Document> {
            let mut doc = Document::from_path(path)?;
            doc.process().with_context(|| format!("processing {}", path.display()))?;
            Ok(doc)
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(dir = %dir.display(), documents = docs.len(), "corpus loaded");
    Ok(docs)
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CorpusStats {
    pub documents: usize,
    pub size_kb: f64,
    pub total_words: usize,
    pub unique_words: usize,
}

pub fn stats(docs: &[Document]) -> CorpusStats {
    let mut unique: HashSet<&str> = HashSet::new();
    let mut total_words = 0;
    let mut bytes = 0;
    for doc in docs {
        bytes += doc.size();
        total_words += doc.tokens().len();
        unique.extend(doc.unique_tokens().iter().map(String::as_str));
    }
    CorpusStats {
        documents: docs.len(),
        size_kb: bytes as f64 / 1024.0,
        total_words,
        unique_words: unique.len(),
    }
}
