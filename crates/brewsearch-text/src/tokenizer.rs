use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tantivy::tokenizer::{LowerCaser, RegexTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use brewsearch_core::config::{SearchSettings, StopwordChoice};
use brewsearch_core::BuildError;

/// Runs of letters (with any combining marks) form tokens; digits,
/// punctuation and whitespace separate them, so purely numeric tokens never
/// surface.
const TOKEN_PATTERN: &str = r"[\p{Alphabetic}\p{M}]+";

const SWEDISH: &[&str] = &[
	"alla","allt","att","av","blev","bli","blir","blivit","de","dem","den","denna","deras","dess","dessa","det","detta","dig","din","dina","ditt","du","där","då","efter","ej","eller","en","er","era","ert","ett","från","för","ha","hade","han","hans","har","henne","hennes","hon","honom","hur","här","i","icke","ingen","inom","inte","jag","ju","kan","kunde","man","med","mellan","men","mig","min","mina","mitt","mot","mycket","ni","nu","när","någon","något","några","och","om","oss","på","samma","sedan","sig","sin","sina","sitta","själv","skulle","som","så","sådan","sådana","sådant","till","under","upp","ut","utan","vad","var","vara","varför","varit","varje","vars","vart","vem","vi","vid","vilka","vilkas","vilken","vilket","vår","våra","vårt","än","är","åt","över",
];

const ENGLISH: &[&str] = &[
	"a","an","and","are","as","at","be","by","for","from","has","he","in","is","it","its","of","on","that","the","to","was","will","with","or","but","not","this","these","they","them","their","there","then","than","so","if","when","where","why","how","what","which","who","whom","whose","can","could","should","would","may","might","must","shall","do","does","did","have","had","having",
];

/// A case-folded stopword set. Membership is checked after the tokenizer has
/// folded case, so entries are folded on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords(BTreeSet<String>);

impl Stopwords {
	pub fn none() -> Self { Self::default() }

	pub fn swedish() -> Self { SWEDISH.iter().copied().collect() }

	pub fn english() -> Self { ENGLISH.iter().copied().collect() }

	/// Built-in list picked by `search.stopwords` plus `search.extra_stopwords`.
	pub fn from_settings(settings: &SearchSettings) -> Self {
		let mut words = match settings.stopwords {
			StopwordChoice::Sv => Self::swedish(),
			StopwordChoice::En => Self::english(),
			StopwordChoice::None => Self::none(),
		};
		words.extend(settings.extra_stopwords.iter().map(String::as_str));
		words
	}

	pub fn contains(&self, word: &str) -> bool { self.0.contains(&fold_case(word)) }

	pub fn len(&self) -> usize { self.0.len() }

	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	fn extend<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
		self.0.extend(words.into_iter().map(fold_case));
	}
}

/// Char-by-char lowercasing, the same fold `LowerCaser` applies to tokens.
/// `str::to_lowercase` differs on a word-final sigma.
fn fold_case(word: &str) -> String { word.chars().flat_map(char::to_lowercase).collect() }

impl<'a> FromIterator<&'a str> for Stopwords {
	fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
		let mut words = Self::none();
		words.extend(iter);
		words
	}
}

/// Turns composed document text (or query text) into index terms:
/// letters only, lower-cased, stopwords removed, order and repeats kept.
#[derive(Clone)]
pub struct Tokenizer {
	analyzer: TextAnalyzer,
	stopwords: Arc<Stopwords>,
}

impl Tokenizer {
	pub fn new(stopwords: &Stopwords) -> Result<Self, BuildError> {
		let splitter = RegexTokenizer::new(TOKEN_PATTERN).map_err(|e| BuildError::Tokenizer(e.to_string()))?;
		let analyzer = TextAnalyzer::builder(splitter)
			.filter(LowerCaser)
			.filter(StopWordFilter::remove(stopwords.0.iter().cloned()))
			.build();
		Ok(Self { analyzer, stopwords: Arc::new(stopwords.clone()) })
	}

	pub fn tokenize(&self, text: &str) -> Vec<String> {
		// token_stream borrows the analyzer mutably
		let mut analyzer = self.analyzer.clone();
		let mut stream = analyzer.token_stream(text);
		let mut tokens = Vec::new();
		while stream.advance() { tokens.push(stream.token().text.clone()); }
		tokens
	}
}

impl fmt::Debug for Tokenizer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Tokenizer").field("pattern", &TOKEN_PATTERN).field("stopwords", &self.stopwords.len()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokenize(text: &str, stopwords: &Stopwords) -> Vec<String> { Tokenizer::new(stopwords).unwrap().tokenize(text) }

	#[test]
	fn folds_case_and_splits_on_non_letters() {
		let tokens = tokenize("Pale-Ale, DRY!hoppy\tbitter", &Stopwords::none());
		assert_eq!(tokens, ["pale", "ale", "dry", "hoppy", "bitter"]);
	}

	#[test]
	fn digits_separate_and_numbers_vanish() {
		let tokens = tokenize("IPA 5,6% 330ml 2024", &Stopwords::none());
		assert_eq!(tokens, ["ipa", "ml"]);
	}

	#[test]
	fn keeps_non_ascii_letters() {
		let tokens = tokenize("Öl från Östersjön, Mörk lager", &Stopwords::none());
		assert_eq!(tokens, ["öl", "från", "östersjön", "mörk", "lager"]);
	}

	#[test]
	fn removes_stopwords_after_folding() {
		let stopwords: Stopwords = ["Och", "MED"].into_iter().collect();
		let tokens = tokenize("Maltig och fruktig MED inslag av ek", &stopwords);
		assert_eq!(tokens, ["maltig", "fruktig", "inslag", "av", "ek"]);
		assert!(stopwords.contains("och"));
	}

	#[test]
	fn keeps_repeats_and_order() {
		let tokens = tokenize("dry ale dry", &Stopwords::none());
		assert_eq!(tokens, ["dry", "ale", "dry"]);
	}

	#[test]
	fn swedish_list_filters_function_words() {
		let tokens = tokenize("Passar till kryddig mat och grillat", &Stopwords::swedish());
		assert_eq!(tokens, ["passar", "kryddig", "mat", "grillat"]);
	}

	#[test]
	fn settings_pick_list_and_extras() {
		let settings = SearchSettings { stopwords: StopwordChoice::En, extra_stopwords: vec!["Beer".into()], ..SearchSettings::default() };
		let stopwords = Stopwords::from_settings(&settings);
		assert!(stopwords.contains("the"));
		assert!(stopwords.contains("beer"));
		assert!(!stopwords.contains("och"));
	}

	#[test]
	fn stopwords_fold_like_tokens() {
		let stopwords: Stopwords = ["ΣΟΦΟΣ"].into_iter().collect();
		assert_eq!(tokenize("ΣΟΦΟΣ", &Stopwords::none()), ["σοφοσ"]);
		assert_eq!(tokenize("ΣΟΦΟΣ öl", &stopwords), ["öl"]);
		assert!(stopwords.contains("Σοφοσ"));
	}

	#[test]
	fn combining_marks_stay_inside_words() {
		let tokens = tokenize("Mo\u{308}rk lager", &Stopwords::none());
		assert_eq!(tokens, ["mo\u{308}rk", "lager"]);
	}

	#[test]
	fn empty_and_separator_only_text() {
		assert!(tokenize("", &Stopwords::none()).is_empty());
		assert!(tokenize(" 42 -- !! ", &Stopwords::none()).is_empty());
	}
}
