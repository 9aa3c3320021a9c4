use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use termdex::{
    ingest, CoordinateInvertedIndex, DocId, Document, DoubleWordIndex, HitSet, IncidenceMatrix,
    InvertedIndex, Proximity, Searchable, CLOSE_WORDS,
};
use tracing_subscriber::{fmt, EnvFilter};

mod corpus;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Index a directory of text files in memory and run boolean or phrase queries", long_about = None)]
struct Cli {
    /// Directory holding the corpus, one document per file
    #[arg(long, default_value = "./data")]
    corpus: PathBuf,
    /// Index structure to build
    #[arg(long, value_enum, default_value_t = Kind::Inverted)]
    kind: Kind,
    /// Proximity window for phrase queries against the coordinate index
    #[arg(long, default_value_t = CLOSE_WORDS)]
    window: u32,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Incidence,
    Inverted,
    Biword,
    Coordinate,
}

#[derive(Subcommand)]
enum Commands {
    /// Corpus size, word count and vocabulary size
    Stats,
    /// Documents containing TERM
    Search { term: String },
    /// Documents not containing TERM
    Not { term: String },
    /// Documents containing both terms
    And { left: String, right: String },
    /// Documents containing either term
    Or { left: String, right: String },
    /// Two-word phrase (biword) or proximity (coordinate) query
    Phrase { left: String, right: String },
}

#[derive(Serialize)]
struct Hit {
    doc_id: DocId,
    title: String,
}

#[derive(Serialize)]
struct ProximityHit {
    doc_id: DocId,
    title: String,
    matches: Vec<Proximity>,
}

enum Engine {
    Incidence(IncidenceMatrix),
    Inverted(InvertedIndex),
    Biword(DoubleWordIndex),
    Coordinate(CoordinateInvertedIndex),
}

impl Engine {
    fn build(kind: Kind, window: u32, docs: &[Document]) -> Self {
        let engine = match kind {
            Kind::Incidence => Engine::Incidence(IncidenceMatrix::new()),
            Kind::Inverted => Engine::Inverted(InvertedIndex::new()),
            Kind::Biword => Engine::Biword(DoubleWordIndex::new()),
            Kind::Coordinate => Engine::Coordinate(CoordinateInvertedIndex::with_window(window)),
        };
        let ids = match &engine {
            Engine::Incidence(idx) => ingest(idx, docs),
            Engine::Inverted(idx) => ingest(idx, docs),
            Engine::Biword(idx) => ingest(idx, docs),
            Engine::Coordinate(idx) => ingest(idx, docs),
        };
        tracing::info!(?kind, documents = ids.len(), "index built");
        engine
    }

    fn run(&self, command: &Commands) -> Result<Value> {
        match (self, command) {
            (Engine::Biword(idx), Commands::Phrase { left, right }) => {
                let docs = idx.search_phrase(&left.to_lowercase(), &right.to_lowercase());
                to_json(titled(idx, docs))
            }
            (Engine::Coordinate(idx), Commands::Phrase { left, right }) => {
                let found = idx.search_phrase(&left.to_lowercase(), &right.to_lowercase());
                let hits: Vec<ProximityHit> = found
                    .into_iter()
                    .map(|(doc_id, matches)| ProximityHit {
                        doc_id,
                        title: idx.title(doc_id).unwrap_or_default(),
                        matches,
                    })
                    .collect();
                to_json(hits)
            }
            (_, Commands::Phrase { .. }) => bail!("phrase queries need --kind biword or --kind coordinate"),
            (Engine::Incidence(idx), cmd) => boolean(idx, cmd),
            (Engine::Inverted(idx), cmd) => boolean(idx, cmd),
            (Engine::Biword(idx), cmd) => boolean(idx, cmd),
            (Engine::Coordinate(idx), cmd) => boolean(idx, cmd),
        }
    }
}

fn boolean<S: Searchable>(index: &S, command: &Commands) -> Result<Value> {
    let hits = match command {
        Commands::Search { term } => index.bool_search(&term.to_lowercase()),
        Commands::Not { term } => index.bool_search_not(&term.to_lowercase()),
        Commands::And { left, right } => index.bool_search_and(&left.to_lowercase(), &right.to_lowercase()),
        Commands::Or { left, right } => index.bool_search_or(&left.to_lowercase(), &right.to_lowercase()),
        Commands::Stats | Commands::Phrase { .. } => bail!("not a boolean query"),
    };
    to_json(titled(index, hits.doc_ids()))
}

fn titled<S: Searchable>(index: &S, doc_ids: impl IntoIterator<Item = DocId>) -> Vec<Hit> {
    doc_ids
        .into_iter()
        .map(|doc_id| Hit { doc_id, title: index.title(doc_id).unwrap_or_default() })
        .collect()
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let docs = corpus::load_corpus(&cli.corpus)?;
    let output = match cli.command {
        Commands::Stats => to_json(corpus::stats(&docs))?,
        ref query => Engine::build(cli.kind, cli.window, &docs).run(query)?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<Document> {
        ["the cat sat", "the dog sat"]
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let mut doc = Document::new(format!("doc{i}.txt"), *text);
                doc.process().unwrap();
                doc
            })
            .collect()
    }

    #[test]
    fn boolean_queries_list_titles() {
        let engine = Engine::build(Kind::Incidence, CLOSE_WORDS, &docs());
        let out = engine.run(&Commands::Search { term: "CAT".into() }).unwrap();
        assert_eq!(out, serde_json::json!([{ "doc_id": 0, "title": "doc0.txt" }]));
    }

    #[test]
    fn proximity_query_reports_matches() {
        let engine = Engine::build(Kind::Coordinate, CLOSE_WORDS, &docs());
        let out = engine
            .run(&Commands::Phrase { left: "the".into(), right: "sat".into() })
            .unwrap();
        assert_eq!(out[0]["matches"][0], serde_json::json!({ "left": 0, "right": 2, "distance": 2 }));
        assert_eq!(out.as_array().unwrap().len(), 2);
    }

    #[test]
    fn phrase_needs_a_positional_kind() {
        let engine = Engine::build(Kind::Inverted, CLOSE_WORDS, &docs());
        assert!(engine.run(&Commands::Phrase { left: "the".into(), right: "cat".into() }).is_err());
    }
}
