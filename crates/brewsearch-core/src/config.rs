//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `brewsearch.toml` + `brewsearch.<env>.toml` + `APP_*`
//! env vars (`__` separates nesting, e.g. `APP_SEARCH__DEFAULT_LIMIT`).
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub const DEFAULT_LIMIT: usize = 50;
pub const DEFAULT_RECORDS_CSV: &str = "data/beers.csv";

/// Which built-in stopword list the tokenizer starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwordChoice {
    #[default]
    Sv,
    En,
    None,
}

/// Typed view over the `search.*` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub default_limit: usize,
    pub stopwords: StopwordChoice,
    pub extra_stopwords: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { default_limit: DEFAULT_LIMIT, stopwords: StopwordChoice::default(), extra_stopwords: Vec::new() }
    }
}

#[derive(Debug)]
pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Load `brewsearch*.toml` files found in `base_dir`; relative paths in the
    /// config resolve against it.
    pub fn load_in(base_dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new()
            .merge(Serialized::default("search", SearchSettings::default()))
            .merge(Serialized::default("data.records_csv", DEFAULT_RECORDS_CSV))
            .merge(Toml::file(base_dir.join("brewsearch.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("brewsearch.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("brewsearch.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("brewsearch.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn search_settings(&self) -> anyhow::Result<SearchSettings> { self.get("search") }

    /// Configured record CSV, expanded and resolved against the config dir.
    pub fn records_path(&self) -> anyhow::Result<PathBuf> {
        let raw: String = self.get("data.records_csv")?;
        Ok(resolve_with_base(&self.base_dir, raw))
    }

    fn validate(&self) -> anyhow::Result<()> {
        let search = self.search_settings()?;
        if search.default_limit == 0 {
            return Err(Error::InvalidConfig("search.default_limit must be at least 1".into()).into());
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
