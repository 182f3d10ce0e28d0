//! Text preprocessing
//!
//! Turns raw text into an index-aligned [`Document`]: sentence splitting,
//! word tokenization, stopword removal, lemmatization and POS tagging.

use super::tokenizer::Tokenizer;
use super::{Lemmatize, PosLookup, StopwordLookup};
use crate::errors::Result;
use crate::types::{Document, PosTag, Token};

/// Preprocessor over borrowed dictionary lookups
pub struct Preprocessor<'a> {
    tokenizer: Tokenizer,
    stopwords: &'a dyn StopwordLookup,
    lemmatizer: &'a dyn Lemmatize,
    tagger: &'a dyn PosLookup,
}

impl<'a> Preprocessor<'a> {
    /// Create a preprocessor from the three lookups
    pub fn new(
        stopwords: &'a dyn StopwordLookup,
        lemmatizer: &'a dyn Lemmatize,
        tagger: &'a dyn PosLookup,
    ) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            stopwords,
            lemmatizer,
            tagger,
        }
    }

    /// Create a preprocessor from a single value implementing all three lookups
    pub fn from_lexicon<T>(lexicon: &'a T) -> Self
    where
        T: StopwordLookup + Lemmatize + PosLookup,
    {
        Self::new(lexicon, lexicon, lexicon)
    }

    /// Use a custom tokenizer
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Split text into sentences
    pub fn tokenize_sentences(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize_sentences(text)
    }

    /// Split a sentence into lowercase word tokens
    pub fn tokenize_words(&self, sentence: &str) -> Vec<String> {
        self.tokenizer.tokenize_words(sentence)
    }

    /// Drop stopwords and lemmatize each sentence.
    ///
    /// Output has one entry per input sentence; a sentence made entirely of
    /// stopwords becomes `""`.
    pub fn normalize(&self, sentences: &[String]) -> Vec<String> {
        sentences
            .iter()
            .map(|sentence| {
                self.tokenize_words(sentence)
                    .into_iter()
                    .filter(|word| !self.stopwords.is_stopword(word))
                    .map(|word| self.lemmatizer.lemmatize(&word).to_lowercase())
                    .filter(|lemma| !lemma.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    /// Tag every word of each processed sentence
    pub fn tag_parts_of_speech(&self, processed: &[String]) -> Vec<Vec<PosTag>> {
        processed
            .iter()
            .enumerate()
            .map(|(idx, sentence)| {
                self.tokens(idx, sentence)
                    .iter()
                    .map(Token::pos_or_unknown)
                    .collect()
            })
            .collect()
    }

    /// Tagged tokens of one processed sentence
    pub fn tokens(&self, sentence_idx: usize, processed: &str) -> Vec<Token> {
        processed
            .split_whitespace()
            .enumerate()
            .map(|(token_idx, word)| {
                Token::new(word, sentence_idx, token_idx).with_pos(self.tagger.pos_tag(word))
            })
            .collect()
    }

    /// Full preprocessing of raw text
    pub fn preprocess(&self, text: &str) -> Result<Document> {
        let originals = self.tokenize_sentences(text);
        let processed = self.normalize(&originals);
        let tags = self.tag_parts_of_speech(&processed);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sentences = originals.len(),
            empty_after_filtering = processed.iter().filter(|s| s.is_empty()).count(),
            "preprocessed document"
        );

        Document::new(originals, processed, tags)
    }
}
