//! Ranking documents against query text.

use tracing::debug;

use brewsearch_core::{DocumentId, QueryError, SearchHit};

use crate::corpus::Corpus;
use crate::vector::DocumentVector;

/// Scores every document of a corpus against ad-hoc query vectors.
///
/// Holds only a shared borrow of the corpus; any number of engines may query
/// the same corpus at once.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'c> {
    corpus: &'c Corpus,
}

impl<'c> QueryEngine<'c> {
    pub fn new(corpus: &'c Corpus) -> Self { Self { corpus } }

    /// Query vector built with the corpus tokenizer and IDF table.
    /// Out-of-vocabulary terms are dropped; nothing left means the zero vector.
    pub fn vectorize(&self, text: &str) -> DocumentVector {
        let tokens = self.corpus.tokenizer().tokenize(text);
        let vector = self.corpus.vocabulary().weigh(&tokens);
        debug!(tokens = tokens.len(), known_terms = vector.len(), "query vectorized");
        vector
    }

    /// Top `limit` documents by cosine similarity to `text`.
    ///
    /// Never fails: a degenerate query yields all-zero scores in insertion
    /// order. The result holds `min(limit, corpus size)` hits.
    pub fn query(&self, text: &str, limit: usize) -> Vec<SearchHit> {
        let query = self.vectorize(text);
        self.rank(&query, limit)
    }

    /// Rank against the composed text of `id`. The source document stays in
    /// the result and normally ranks first.
    pub fn find_similar_to(&self, id: DocumentId, limit: usize) -> Result<Vec<SearchHit>, QueryError> {
        let document = self.corpus.document(id).ok_or(QueryError::UnknownDocument(id))?;
        Ok(self.query(document.composed_text(), limit))
    }

    fn rank(&self, query: &DocumentVector, limit: usize) -> Vec<SearchHit> {
        let mut scored: Vec<(usize, f64)> = self
            .corpus
            .vectors()
            .iter()
            .enumerate()
            .map(|(i, v)| (i, if query.is_zero() { 0.0 } else { v.dot(query).clamp(0.0, 1.0) }))
            .collect();
        // score descending, then insertion order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(limit);
        let documents = self.corpus.documents();
        scored.into_iter().map(|(i, score)| SearchHit { id: documents[i].id(), score }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Stopwords;
    use brewsearch_core::{Document, RecordInput};

    fn corpus(texts: &[&str], stopwords: &Stopwords) -> Corpus {
        let documents = texts.iter().map(|t| Document::new(DocumentId::new(), RecordInput::from_text(*t))).collect();
        Corpus::build(documents, stopwords).unwrap()
    }

    fn positions(corpus: &Corpus, hits: &[SearchHit]) -> Vec<usize> {
        hits.iter().map(|h| corpus.position(h.id).unwrap()).collect()
    }

    #[test]
    fn shared_terms_outrank_unrelated_document() {
        let c = corpus(&["Ale Pale Dry", "Lager Mild", "Ale Strong Dry"], &Stopwords::none());
        let hits = QueryEngine::new(&c).query("Ale Dry", 3);
        assert_eq!(hits.len(), 3);
        let order = positions(&c, &hits);
        assert_eq!(order, [0, 2, 1]);
        assert!(hits[1].score > hits[2].score);
        assert_eq!(hits[2].score, 0.0);
    }

    #[test]
    fn equal_scores_keep_insertion_order() {
        let c = corpus(&["stout roasted", "ale hoppy", "stout roasted coffee", "ale hoppy"], &Stopwords::none());
        let hits = QueryEngine::new(&c).query("ale hoppy", 4);
        assert_eq!(positions(&c, &hits), [1, 3, 0, 2]);
        assert_eq!(hits[0].score, hits[1].score);
    }

    #[test]
    fn stopword_and_unknown_queries_score_zero() {
        let stopwords: Stopwords = ["och"].into_iter().collect();
        let c = corpus(&["ale dry", "lager mild", "stout"], &stopwords);
        let engine = QueryEngine::new(&c);
        for text in ["och", "pilsner", "", "1234"] {
            let hits = engine.query(text, 10);
            assert_eq!(positions(&c, &hits), [0, 1, 2], "query {text:?}");
            assert!(hits.iter().all(|h| h.score == 0.0));
        }
    }

    #[test]
    fn limit_bounds_result_length() {
        let c = corpus(&["a", "b", "c"], &Stopwords::none());
        let engine = QueryEngine::new(&c);
        assert_eq!(engine.query("a", 2).len(), 2);
        assert_eq!(engine.query("a", 10).len(), 3);
        assert!(engine.query("a", 0).is_empty());
    }

    #[test]
    fn similar_to_keeps_source_first() {
        let c = corpus(&["ale pale dry", "lager mild", "ale strong dry"], &Stopwords::none());
        let source = c.documents()[2].id();
        let hits = QueryEngine::new(&c).find_similar_to(source, 3).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, source);
        assert!((hits[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn similar_to_unknown_id_fails() {
        let c = corpus(&["ale"], &Stopwords::none());
        let missing = DocumentId::new();
        assert_eq!(QueryEngine::new(&c).find_similar_to(missing, 5).unwrap_err(), QueryError::UnknownDocument(missing));
    }
}
