//! brewsearch-cli
//!
//! The outer shell around the similarity core: a CSV loader for the beer
//! catalogue and text/JSON rendering of ranked results.

pub mod loader;
pub mod render;
