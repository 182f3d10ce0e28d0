//! Stopword filtering
//!
//! The built-in list is the English list from the `stop-words` crate. Custom
//! lists come from `stopwords.csv` through [`crate::nlp::lexicon`].

use super::StopwordLookup;
use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Lowercase stopword set consulted during sentence normalization
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    words: FxHashSet<String>,
}

impl StopwordFilter {
    /// The built-in English list
    pub fn english() -> Self {
        Self::from_words(get(LANGUAGE::English))
    }

    /// A filter that keeps every word
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_list(words: &[&str]) -> Self {
        Self::from_words(words.iter().copied())
    }

    /// Words are trimmed and lowercased; blank entries are skipped
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Case-insensitive membership
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl StopwordLookup for StopwordFilter {
    fn is_stopword(&self, word: &str) -> bool {
        self.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list() {
        let filter = StopwordFilter::english();

        assert!(filter.contains("the"));
        assert!(filter.contains("The"));
        assert!(filter.contains("is"));
        assert!(!filter.contains("summary"));
        assert!(!filter.contains("graph"));
    }

    #[test]
    fn test_custom_list_replaces_builtin() {
        let filter = StopwordFilter::from_list(&["custom", "Words"]);

        assert!(filter.contains("custom"));
        assert!(filter.contains("words"));
        assert!(!filter.contains("the"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_from_words_trims_and_skips_blanks() {
        let filter = StopwordFilter::from_words(vec![" The ".to_string(), String::new()]);

        assert_eq!(filter.len(), 1);
        assert!(filter.contains("the"));
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopwordFilter::empty();

        assert!(!filter.contains("the"));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_lookup_trait_dispatch() {
        let filter = StopwordFilter::from_list(&["and"]);
        let lookup: &dyn StopwordLookup = &filter;

        assert!(lookup.is_stopword("AND"));
        assert!(!lookup.is_stopword("cat"));
    }
}
