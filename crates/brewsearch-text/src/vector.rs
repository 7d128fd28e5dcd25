//! Sparse, length-normalised term-weight vectors.

use std::cmp::Ordering;

/// Index of a term in the corpus vocabulary.
pub type TermId = u32;

/// Term weights of one document (or one query), sorted by term id.
///
/// Either empty (the zero vector) or of unit Euclidean length, so the dot
/// product of two vectors is their cosine similarity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentVector {
    entries: Vec<(TermId, f64)>,
}

impl DocumentVector {
    /// Normalise raw weights. Zero weights are dropped; if nothing remains the
    /// zero vector is returned.
    pub(crate) fn normalized(mut raw: Vec<(TermId, f64)>) -> Self {
        raw.retain(|&(_, w)| w > 0.0);
        raw.sort_unstable_by_key(|&(t, _)| t);
        let norm = raw.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        if norm == 0.0 { return Self::default(); }
        for (_, w) in &mut raw { *w /= norm; }
        Self { entries: raw }
    }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn weight(&self, term: TermId) -> f64 {
        self.entries
            .binary_search_by_key(&term, |&(t, _)| t)
            .map_or(0.0, |i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, f64)> + '_ { self.entries.iter().copied() }

    pub fn norm(&self) -> f64 { self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt() }

    /// Merge-join dot product over the shared terms.
    pub fn dot(&self, other: &Self) -> f64 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => { sum += wa * wb; i += 1; j += 1; }
            }
        }
        sum
    }
}
