//! Natural Language Processing components
//!
//! This module provides tokenization, stopword filtering, dictionary lookups
//! and the preprocessor that turns raw text into a [`crate::types::Document`].
//!
//! The pipeline only talks to dictionaries through the three lookup traits
//! below. They are read-only, so one loaded lexicon can serve any number of
//! concurrent summarizations.

pub mod lexicon;
pub mod preprocessor;
pub mod stopwords;
pub mod tokenizer;

use crate::types::PosTag;

/// Stopword membership test
pub trait StopwordLookup {
    /// Check if `word` is a stopword
    fn is_stopword(&self, word: &str) -> bool;
}

/// Lemmatization lookup
pub trait Lemmatize {
    /// Base form of `word`, or `word` itself when unknown
    fn lemmatize(&self, word: &str) -> String;
}

/// Part-of-speech lookup
pub trait PosLookup {
    /// Tag for `word`, or [`PosTag::Unknown`] when unresolved
    fn pos_tag(&self, word: &str) -> PosTag;
}
