#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod store;
pub mod traits;
pub mod types;

pub use error::{BuildError, Error, QueryError, Result};
pub use store::DocumentStore;
pub use traits::SimilaritySearch;
pub use types::{Document, DocumentId, Field, RecordInput, SearchHit};
