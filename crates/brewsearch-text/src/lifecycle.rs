//! Build lifecycle of the search index: `Uninitialized -> Indexing -> Ready`,
//! or `-> Failed` when the build is rejected.

use std::mem;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use brewsearch_core::{BuildError, DocumentId, QueryError, RecordInput, SearchHit, SimilaritySearch};

use crate::corpus::Corpus;
use crate::query::QueryEngine;
use crate::tokenizer::Stopwords;

/// Observable state of a [`SearchIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexState {
    Uninitialized,
    Indexing,
    Ready,
    Failed(BuildError),
}

#[derive(Debug)]
enum Slot {
    Uninitialized,
    Indexing,
    Ready(Arc<Corpus>),
    Failed(BuildError),
}

/// Owns the corpus once built and gates queries on the build having
/// succeeded.
///
/// The lock only guards the state switch; queries clone the `Arc<Corpus>` and
/// score without holding it.
#[derive(Debug)]
pub struct SearchIndex {
    slot: RwLock<Slot>,
}

impl Default for SearchIndex {
    fn default() -> Self { Self::new() }
}

impl SearchIndex {
    pub fn new() -> Self { Self { slot: RwLock::new(Slot::Uninitialized) } }

    pub fn state(&self) -> IndexState {
        match &*self.slot.read().unwrap_or_else(PoisonError::into_inner) {
            Slot::Uninitialized => IndexState::Uninitialized,
            Slot::Indexing => IndexState::Indexing,
            Slot::Ready(_) => IndexState::Ready,
            Slot::Failed(e) => IndexState::Failed(e.clone()),
        }
    }

    pub fn is_ready(&self) -> bool { self.state() == IndexState::Ready }

    /// Run the build phase over `raw_records`.
    ///
    /// A later successful build replaces the corpus wholesale. Calling this
    /// while another build runs fails with [`BuildError::InProgress`] and
    /// leaves the running build untouched. A build that unwinds leaves the
    /// index `Failed(Aborted)`.
    pub fn build<I>(&self, raw_records: I, stopwords: &Stopwords) -> Result<Arc<Corpus>, BuildError>
    where
        I: IntoIterator<Item = RecordInput>,
    {
        let mut guard = {
            let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
            if matches!(*slot, Slot::Indexing) { return Err(BuildError::InProgress); }
            *slot = Slot::Indexing;
            IndexingGuard { slot: &self.slot, next: Slot::Failed(BuildError::Aborted) }
        };
        info!("index build started");
        match crate::build_index(raw_records, stopwords).map(Arc::new) {
            Ok(corpus) => {
                info!(documents = corpus.len(), "index ready");
                guard.next = Slot::Ready(Arc::clone(&corpus));
                Ok(corpus)
            }
            Err(e) => {
                warn!(error = %e, "index build failed");
                guard.next = Slot::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// The built corpus, or `IndexNotReady` in any state but `Ready`.
    pub fn corpus(&self) -> Result<Arc<Corpus>, QueryError> {
        match &*self.slot.read().unwrap_or_else(PoisonError::into_inner) {
            Slot::Ready(corpus) => Ok(Arc::clone(corpus)),
            _ => Err(QueryError::IndexNotReady),
        }
    }
}

/// Moves the slot out of `Indexing` on scope exit, unwinding included.
struct IndexingGuard<'a> {
    slot: &'a RwLock<Slot>,
    next: Slot,
}

impl Drop for IndexingGuard<'_> {
    fn drop(&mut self) {
        let next = mem::replace(&mut self.next, Slot::Uninitialized);
        if matches!(next, Slot::Failed(BuildError::Aborted)) { warn!("index build aborted"); }
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

impl SimilaritySearch for SearchIndex {
    fn query(&self, text: &str, k: usize) -> Result<Vec<SearchHit>, QueryError> {
        let corpus = self.corpus()?;
        Ok(QueryEngine::new(&corpus).query(text, k))
    }

    fn find_similar_to(&self, id: DocumentId, k: usize) -> Result<Vec<SearchHit>, QueryError> {
        let corpus = self.corpus()?;
        QueryEngine::new(&corpus).find_similar_to(id, k)
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;

    fn records() -> Vec<RecordInput> {
        ["Ale Pale Dry", "Lager Mild", "Ale Strong Dry"].into_iter().map(RecordInput::from_text).collect()
    }

    #[test]
    fn queries_fail_before_build() {
        let index = SearchIndex::new();
        assert_eq!(index.state(), IndexState::Uninitialized);
        assert_eq!(index.query("ale", 3).unwrap_err(), QueryError::IndexNotReady);
        assert_eq!(index.find_similar_to(DocumentId::new(), 3).unwrap_err(), QueryError::IndexNotReady);
    }

    #[test]
    fn successful_build_is_ready() {
        let index = SearchIndex::new();
        let corpus = index.build(records(), &Stopwords::none()).unwrap();
        assert_eq!(index.state(), IndexState::Ready);
        assert!(index.is_ready());
        let hits = index.query("lager", 1).unwrap();
        assert_eq!(hits[0].id, corpus.documents()[1].id());
    }

    #[test]
    fn empty_build_fails_and_blocks_queries() {
        let index = SearchIndex::new();
        assert_eq!(index.build(Vec::new(), &Stopwords::none()).unwrap_err(), BuildError::EmptyInput);
        assert_eq!(index.state(), IndexState::Failed(BuildError::EmptyInput));
        assert_eq!(index.query("ale", 3).unwrap_err(), QueryError::IndexNotReady);
    }

    #[test]
    fn observers_during_build_see_indexing() {
        let index = SearchIndex::new();
        let mut seen = Vec::new();
        let feed = records().into_iter().map(|record| {
            let nested = index.build(vec![RecordInput::from_text("Stout")], &Stopwords::none()).err();
            seen.push((index.state(), index.query("ale", 3).err(), nested));
            record
        });
        let corpus = index.build(feed, &Stopwords::none()).unwrap();
        assert_eq!(seen.len(), 3);
        for observed in seen {
            assert_eq!(observed, (IndexState::Indexing, Some(QueryError::IndexNotReady), Some(BuildError::InProgress)));
        }
        assert_eq!(index.state(), IndexState::Ready);
        assert_eq!(corpus.len(), 3);
    }

    #[test]
    fn panicking_build_fails_and_allows_rebuild() {
        let index = SearchIndex::new();
        let feed = records().into_iter().map(|record| -> RecordInput {
            if record.fields[0].value.starts_with("Lager") { panic!("feed broke"); }
            record
        });
        let unwound = panic::catch_unwind(AssertUnwindSafe(|| index.build(feed, &Stopwords::none())));
        assert!(unwound.is_err());
        assert_eq!(index.state(), IndexState::Failed(BuildError::Aborted));
        assert_eq!(index.query("ale", 3).unwrap_err(), QueryError::IndexNotReady);
        index.build(records(), &Stopwords::none()).unwrap();
        assert!(index.is_ready());
    }

    #[test]
    fn rebuild_replaces_corpus() {
        let index = SearchIndex::new();
        let first = index.build(records(), &Stopwords::none()).unwrap();
        let second = index.build(vec![RecordInput::from_text("Stout")], &Stopwords::none()).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(index.corpus().unwrap().len(), second.len());
        assert_eq!(
            index.find_similar_to(first.documents()[0].id(), 3).unwrap_err(),
            QueryError::UnknownDocument(first.documents()[0].id())
        );
    }
}
