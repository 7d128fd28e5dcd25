//! Deduplication and identity assignment for raw records.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::BuildError;
use crate::types::{Document, DocumentId, RecordInput};

/// The canonical, ordered and frozen document collection.
///
/// Order is the first-occurrence order of the raw input and is what ranking
/// ties fall back to.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    /// Collapse exact duplicates and give every survivor a fresh id.
    ///
    /// Two records are duplicates iff their ordered field tuples (names and
    /// values) are equal. The first occurrence keeps its position.
    pub fn load<I>(raw_records: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = RecordInput>,
    {
        let mut seen: HashSet<RecordInput> = HashSet::new();
        let mut documents = Vec::new();
        let mut total = 0usize;
        for record in raw_records {
            total += 1;
            if seen.contains(&record) { continue; }
            seen.insert(record.clone());
            documents.push(Document::new(DocumentId::new(), record));
        }
        if total == 0 { return Err(BuildError::EmptyInput); }
        let dropped = total - documents.len();
        if dropped > 0 { debug!(dropped, "collapsed duplicate records"); }
        info!(records = total, documents = documents.len(), "document store loaded");
        Ok(Self { documents })
    }

    pub fn documents(&self) -> &[Document] { &self.documents }

    /// Hand the frozen collection over to the index build.
    pub fn into_documents(self) -> Vec<Document> { self.documents }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// Insertion position of `id`, if present.
    pub fn position(&self, id: DocumentId) -> Option<usize> {
        self.documents.iter().position(|d| d.id() == id)
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.position(id).map(|i| &self.documents[i])
    }
}
