pub mod document;
pub mod error;
pub mod index;
pub mod tokenizer;

pub use document::Document;
pub use error::{Error, Result};
pub use index::biword::DoubleWordIndex;
pub use index::coordinate::{CoordinateInvertedIndex, Proximity, CLOSE_WORDS};
pub use index::incidence::IncidenceMatrix;
pub use index::inverted::InvertedIndex;
pub use index::{ingest, DocId, HitSet, Searchable};
