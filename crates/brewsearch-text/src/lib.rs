//! brewsearch-text
//!
//! TF-IDF text similarity over a small, fixed record collection. `tokenizer`
//! turns text into terms, `corpus` builds the immutable index, `query` ranks
//! documents against text, and `lifecycle` gates queries on a finished build.

pub mod corpus;
pub mod lifecycle;
pub mod query;
pub mod tokenizer;
pub mod vector;

pub use corpus::{Corpus, CorpusStats, Vocabulary};
pub use lifecycle::{IndexState, SearchIndex};
pub use query::QueryEngine;
pub use tokenizer::{Stopwords, Tokenizer};
pub use vector::DocumentVector;

use brewsearch_core::{BuildError, DocumentId, DocumentStore, QueryError, RecordInput, SearchHit};

/// Dedup raw records, assign ids, and build the corpus.
pub fn build_index<I>(raw_records: I, stopwords: &Stopwords) -> Result<Corpus, BuildError>
where
    I: IntoIterator<Item = RecordInput>,
{
    let store = DocumentStore::load(raw_records)?;
    Corpus::build(store.into_documents(), stopwords)
}

/// Rank `corpus` against free text. Never fails.
pub fn query(corpus: &Corpus, text: &str, limit: usize) -> Vec<SearchHit> {
    QueryEngine::new(corpus).query(text, limit)
}

/// Rank `corpus` against the text of one of its documents.
pub fn find_similar_to(corpus: &Corpus, id: DocumentId, limit: usize) -> Result<Vec<SearchHit>, QueryError> {
    QueryEngine::new(corpus).find_similar_to(id, limit)
}
