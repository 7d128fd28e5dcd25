use crate::error::QueryError;
use crate::types::{DocumentId, SearchHit};

/// Read-only similarity search over a built collection.
///
/// Implementations must be safe to share across threads; queries never
/// mutate shared state.
pub trait SimilaritySearch: Send + Sync {
    /// Rank documents against free text. Degenerate text (only stopwords or
    /// unknown terms) yields all-zero scores, not an error.
    fn query(&self, text: &str, k: usize) -> Result<Vec<SearchHit>, QueryError>;

    /// Rank documents against the composed text of document `id`.
    fn find_similar_to(&self, id: DocumentId, k: usize) -> Result<Vec<SearchHit>, QueryError>;
}
