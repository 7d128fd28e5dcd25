//! Plain-text and JSON rendering of ranked hits.

use serde::Serialize;

use brewsearch_core::{Document, DocumentId, Field, SearchHit};
use brewsearch_text::{Corpus, CorpusStats};

pub const NO_MATCHES: &str = "No close matches.";

#[derive(Debug, Serialize)]
struct HitView<'a> {
    rank: usize,
    id: DocumentId,
    score: f64,
    fields: &'a [Field],
}

/// True when nothing scored above zero; callers show [`NO_MATCHES`].
pub fn no_close_matches(hits: &[SearchHit]) -> bool { hits.iter().all(|h| h.score == 0.0) }

pub fn title(document: &Document) -> String {
    let bold = document.field("productNameBold").unwrap_or_default();
    let thin = document.field("productNameThin").unwrap_or_default();
    if thin.is_empty() { bold.to_string() } else { format!("{} {}", bold, thin) }
}

pub fn category_path(document: &Document) -> String {
    ["categoryLevel1", "categoryLevel2", "categoryLevel3", "categoryLevel4"]
        .into_iter()
        .filter_map(|name| document.field(name))
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn because_you_like(document: &Document) -> String {
    let bold = document.field("productNameBold").unwrap_or_default();
    match document.field("productNameThin").filter(|t| !t.is_empty()) {
        Some(thin) => format!("Because you like {} by {}", bold, thin),
        None => format!("Because you like {}", bold),
    }
}

pub fn render_hits(corpus: &Corpus, hits: &[SearchHit]) -> String {
    if no_close_matches(hits) { return NO_MATCHES.to_string(); }
    let mut out = String::new();
    for (rank, hit) in hits.iter().enumerate() {
        let Some(document) = corpus.document(hit.id) else { continue };
        let line = format!("{:>3}. {:>5.1}%  {}", rank + 1, hit.score * 100.0, title(document));
        out.push_str(&line);
        let path = category_path(document);
        if !path.is_empty() {
            out.push_str("  [");
            out.push_str(&path);
            out.push(']');
        }
        out.push('\n');
    }
    out
}

pub fn render_json(corpus: &Corpus, hits: &[SearchHit]) -> serde_json::Result<String> {
    let views: Vec<HitView<'_>> = hits
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            corpus.document(h.id).map(|d| HitView { rank: i + 1, id: h.id, score: h.score, fields: d.fields() })
        })
        .collect();
    serde_json::to_string_pretty(&views)
}

pub fn render_stats(stats: &CorpusStats) -> String {
    format!(
        "documents: {}\nvocabulary: {}\ndocuments without terms: {}",
        stats.documents, stats.vocabulary, stats.zero_vectors
    )
}
