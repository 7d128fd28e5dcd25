//! TF-IDF corpus build.
//!
//! Two parallel passes separated by one barrier: every document is tokenized
//! independently, the vocabulary and IDF table are aggregated from all token
//! lists, then every document is weighted and normalised independently.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use brewsearch_core::{BuildError, Document, DocumentId};

use crate::tokenizer::{Stopwords, Tokenizer};
use crate::vector::{DocumentVector, TermId};

/// Terms of the corpus with their document frequency and IDF.
///
/// Term ids follow lexical order of the terms, so two builds over the same
/// input agree on ids, frequencies and weights.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    ids: HashMap<String, TermId>,
    document_frequency: Vec<u32>,
    idf: Vec<f64>,
}

impl Vocabulary {
    fn from_token_lists(token_lists: &[Vec<String>]) -> Self {
        let mut df: BTreeMap<&str, u32> = BTreeMap::new();
        for tokens in token_lists {
            let distinct: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in distinct { *df.entry(term).or_insert(0) += 1; }
        }
        let n = token_lists.len() as f64;
        let mut vocabulary = Self::default();
        for (id, (term, count)) in df.into_iter().enumerate() {
            vocabulary.terms.push(term.to_string());
            vocabulary.ids.insert(term.to_string(), id as TermId);
            vocabulary.document_frequency.push(count);
            // count >= 1 for every term that made it into the map
            vocabulary.idf.push((n / f64::from(count)).ln());
        }
        vocabulary
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn contains(&self, term: &str) -> bool { self.ids.contains_key(term) }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.ids.get(term).copied() }

    pub fn term(&self, id: TermId) -> Option<&str> { self.terms.get(id as usize).map(String::as_str) }

    pub fn document_frequency(&self, term: &str) -> Option<u32> {
        self.term_id(term).map(|id| self.document_frequency[id as usize])
    }

    pub fn idf(&self, term: &str) -> Option<f64> { self.term_id(term).map(|id| self.idf[id as usize]) }

    /// `(term, document frequency, idf)` in term-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32, f64)> + '_ {
        self.terms
            .iter()
            .zip(&self.document_frequency)
            .zip(&self.idf)
            .map(|((t, &df), &idf)| (t.as_str(), df, idf))
    }

    /// `tf * idf` per known term, normalised. Unknown terms are skipped.
    pub fn weigh<S: AsRef<str>>(&self, tokens: &[S]) -> DocumentVector {
        let mut tf: BTreeMap<TermId, u32> = BTreeMap::new();
        for token in tokens {
            if let Some(id) = self.term_id(token.as_ref()) { *tf.entry(id).or_insert(0) += 1; }
        }
        let raw = tf.into_iter().map(|(id, count)| (id, f64::from(count) * self.idf[id as usize])).collect();
        DocumentVector::normalized(raw)
    }
}

/// Summary numbers of a built corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusStats {
    pub documents: usize,
    pub vocabulary: usize,
    /// Documents whose text is all stopwords (or has no letters at all).
    pub zero_vectors: usize,
}

/// The built, immutable index: documents, vocabulary, IDF table and one
/// weighted vector per document.
///
/// There is no way to add or change documents; build a new corpus instead.
#[derive(Debug)]
pub struct Corpus {
    documents: Vec<Document>,
    positions: HashMap<DocumentId, usize>,
    tokenizer: Tokenizer,
    vocabulary: Vocabulary,
    vectors: Vec<DocumentVector>,
}

impl Corpus {
    pub fn build(documents: Vec<Document>, stopwords: &Stopwords) -> Result<Self, BuildError> {
        if documents.is_empty() { return Err(BuildError::EmptyCorpus); }
        let started = Instant::now();
        let tokenizer = Tokenizer::new(stopwords)?;

        let token_lists: Vec<Vec<String>> = documents.par_iter().map(|d| tokenizer.tokenize(d.composed_text())).collect();
        let vocabulary = Vocabulary::from_token_lists(&token_lists);
        let vectors: Vec<DocumentVector> = token_lists.par_iter().map(|tokens| vocabulary.weigh(tokens)).collect();

        let positions = documents.iter().enumerate().map(|(i, d)| (d.id(), i)).collect();
        let corpus = Self { documents, positions, tokenizer, vocabulary, vectors };
        let stats = corpus.stats();
        if stats.zero_vectors > 0 { debug!(count = stats.zero_vectors, "documents without index terms"); }
        info!(
            documents = stats.documents,
            vocabulary = stats.vocabulary,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "corpus built"
        );
        Ok(corpus)
    }

    pub fn documents(&self) -> &[Document] { &self.documents }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// Insertion position of `id`, if the corpus holds it.
    pub fn position(&self, id: DocumentId) -> Option<usize> { self.positions.get(&id).copied() }

    pub fn document(&self, id: DocumentId) -> Option<&Document> { self.position(id).map(|i| &self.documents[i]) }

    pub fn vector(&self, id: DocumentId) -> Option<&DocumentVector> { self.position(id).map(|i| &self.vectors[i]) }

    pub fn vectors(&self) -> &[DocumentVector] { &self.vectors }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn tokenizer(&self) -> &Tokenizer { &self.tokenizer }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            documents: self.documents.len(),
            vocabulary: self.vocabulary.len(),
            zero_vectors: self.vectors.iter().filter(|v| v.is_zero()).count(),
        }
    }
}
