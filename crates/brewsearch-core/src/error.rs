use thiserror::Error;

use crate::types::DocumentId;

/// Failures of the build phase. Fatal; never retried, never turned into an
/// empty index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("no records supplied to the document store")]
    EmptyInput,

    #[error("the document store produced no documents to index")]
    EmptyCorpus,

    #[error("tokenizer setup failed: {0}")]
    Tokenizer(String),

    #[error("an index build is already in progress")]
    InProgress,

    #[error("the index build stopped before completing")]
    Aborted,
}

/// Failures of a single query call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("index is not ready for queries")]
    IndexNotReady,

    #[error("unknown document: {0}")]
    UnknownDocument(DocumentId),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load records: {0}")]
    Load(String),
}

pub type Result<T> = std::result::Result<T, Error>;
