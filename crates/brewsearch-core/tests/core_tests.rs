use std::fs;

use tempfile::TempDir;

use brewsearch_core::config::{Config, StopwordChoice, DEFAULT_LIMIT};
use brewsearch_core::{BuildError, DocumentStore, RecordInput};

#[test]
fn config_defaults_without_files() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_in(tmp.path()).expect("load");
    let search = config.search_settings().expect("search settings");
    assert_eq!(search.default_limit, DEFAULT_LIMIT);
    assert_eq!(search.stopwords, StopwordChoice::Sv);
    assert!(search.extra_stopwords.is_empty());
    assert_eq!(config.records_path().unwrap(), tmp.path().join("data/beers.csv"));
}

#[test]
fn config_file_overrides_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("brewsearch.toml"),
        "[data]\nrecords_csv = \"/srv/beers.csv\"\n\n[search]\ndefault_limit = 7\nstopwords = \"none\"\nextra_stopwords = [\"öl\"]\n",
    )
    .unwrap();
    let config = Config::load_in(tmp.path()).expect("load");
    let search = config.search_settings().unwrap();
    assert_eq!(search.default_limit, 7);
    assert_eq!(search.stopwords, StopwordChoice::None);
    assert_eq!(search.extra_stopwords, vec!["öl".to_string()]);
    assert_eq!(config.records_path().unwrap(), std::path::PathBuf::from("/srv/beers.csv"));
}

#[test]
fn config_rejects_zero_limit() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("brewsearch.toml"), "[search]\ndefault_limit = 0\n").unwrap();
    assert!(Config::load_in(tmp.path()).is_err());
}

#[test]
fn store_dedup_is_idempotent() {
    let raw = vec![
        RecordInput::from_text("Ale Pale Dry"),
        RecordInput::from_text("Lager Mild"),
        RecordInput::from_text("Ale Pale Dry"),
    ];
    let store = DocumentStore::load(raw).expect("store");
    assert_eq!(store.len(), 2, "one document per distinct content");

    let again: Vec<RecordInput> = store
        .documents()
        .iter()
        .map(|d| d.fields().iter().map(|f| (f.name.clone(), f.value.clone())).collect())
        .collect();
    let rebuilt = DocumentStore::load(again).expect("rebuilt");
    assert_eq!(rebuilt.len(), store.len());
}

#[test]
fn store_rejects_empty_input() {
    assert_eq!(DocumentStore::load(Vec::<RecordInput>::new()).unwrap_err(), BuildError::EmptyInput);
}
