//! Domain types shared by the store, the index and the query engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Separator placed between field values when composing a document's text.
pub const FIELD_SEPARATOR: &str = " ";

/// Opaque, store-assigned document identity.
///
/// Freshly generated for every document a store admits; two builds over the
/// same input hand out different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for DocumentId {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A named text attribute of a record, e.g. `("taste", "Maltig, fruktig")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// One raw record as handed over by a loader, before dedup and identity.
///
/// Field order is significant: it is the order values are composed into
/// text and the order compared when detecting duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordInput {
    pub fields: Vec<Field>,
}

impl RecordInput {
    pub fn new() -> Self { Self::default() }

    /// Builder-style append of a field.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }

    /// Record with a single `text` field; handy for ad-hoc corpora.
    pub fn from_text(text: impl Into<String>) -> Self { Self::new().with("text", text) }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RecordInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| Field::new(k, v)).collect() }
    }
}

/// A stored, identified record.
///
/// `composed_text` is derived once at construction and never changes; there
/// is no way to mutate the fields of a constructed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    fields: Vec<Field>,
    composed_text: String,
}

impl Document {
    pub fn new(id: DocumentId, record: RecordInput) -> Self {
        let composed_text = record
            .fields
            .iter()
            .map(|f| f.value.as_str())
            .collect::<Vec<_>>()
            .join(FIELD_SEPARATOR);
        Self { id, fields: record.fields, composed_text }
    }

    pub fn id(&self) -> DocumentId { self.id }

    pub fn fields(&self) -> &[Field] { &self.fields }

    /// Value of the first field called `name`, if any.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value.as_str())
    }

    pub fn composed_text(&self) -> &str { &self.composed_text }
}

/// A ranked result: which document, and how similar it is to the query.
///
/// `score` is a cosine similarity in `[0, 1]`; higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: DocumentId,
    pub score: f64,
}
