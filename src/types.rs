//! Core types for rank_summarizer
//!
//! This module defines the data shared by every pipeline stage: part-of-speech
//! tags, tokens, the index-aligned [`Document`], and the summarizer
//! configuration.

use crate::errors::{Result, SummarizerError};
use serde::{Deserialize, Serialize};

// ============================================================================
// Part-of-speech tags
// ============================================================================

/// Coarse part-of-speech tags (Universal Dependencies inventory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Numeral,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Particle,
    Interjection,
    Symbol,
    Punctuation,
    Other,
    /// Sentinel for words the POS dictionary does not know
    Unknown,
}

impl PosTag {
    /// Parse a tag string.
    ///
    /// Accepts Universal Dependencies tags (`NOUN`, `PROPN`, ...) and Penn
    /// Treebank tags (`NN`, `NNP`, `VBZ`, ...), case-insensitively. Anything
    /// unrecognised becomes [`PosTag::Unknown`].
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            // Universal Dependencies
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::ProperNoun,
            "VERB" => PosTag::Verb,
            "AUX" => PosTag::Auxiliary,
            "ADJ" => PosTag::Adjective,
            "ADV" => PosTag::Adverb,
            "NUM" => PosTag::Numeral,
            "PRON" => PosTag::Pronoun,
            "DET" => PosTag::Determiner,
            "ADP" => PosTag::Preposition,
            "CCONJ" | "SCONJ" | "CONJ" => PosTag::Conjunction,
            "PART" => PosTag::Particle,
            "INTJ" => PosTag::Interjection,
            "SYM" => PosTag::Symbol,
            "PUNCT" => PosTag::Punctuation,
            "X" => PosTag::Other,

            // Penn Treebank
            "NN" | "NNS" => PosTag::Noun,
            "NNP" | "NNPS" => PosTag::ProperNoun,
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => PosTag::Verb,
            "MD" => PosTag::Auxiliary,
            "JJ" | "JJR" | "JJS" => PosTag::Adjective,
            "RB" | "RBR" | "RBS" | "WRB" => PosTag::Adverb,
            "CD" => PosTag::Numeral,
            "PRP" | "PRP$" | "WP" | "WP$" | "EX" => PosTag::Pronoun,
            "DT" | "PDT" | "WDT" => PosTag::Determiner,
            "IN" => PosTag::Preposition,
            "CC" => PosTag::Conjunction,
            "TO" | "RP" | "POS" => PosTag::Particle,
            "UH" => PosTag::Interjection,
            "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-" | "HYPH" | "NFP" => {
                PosTag::Punctuation
            }
            "FW" | "LS" | "ADD" | "GW" | "XX" => PosTag::Other,

            _ => PosTag::Unknown,
        }
    }

    /// Get the Universal Dependencies tag string for this enum
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::ProperNoun => "PROPN",
            PosTag::Verb => "VERB",
            PosTag::Auxiliary => "AUX",
            PosTag::Adjective => "ADJ",
            PosTag::Adverb => "ADV",
            PosTag::Numeral => "NUM",
            PosTag::Pronoun => "PRON",
            PosTag::Determiner => "DET",
            PosTag::Preposition => "ADP",
            PosTag::Conjunction => "CCONJ",
            PosTag::Particle => "PART",
            PosTag::Interjection => "INTJ",
            PosTag::Symbol => "SYM",
            PosTag::Punctuation => "PUNCT",
            PosTag::Other => "X",
            PosTag::Unknown => "UNK",
        }
    }
}

impl std::str::FromStr for PosTag {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(PosTag::parse(value))
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Token
// ============================================================================

/// A normalized word form taken from a processed sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The normalized (lowercase, lemmatized) form
    pub text: String,
    /// Part-of-speech tag, once tagged
    pub pos: Option<PosTag>,
    /// Sentence index this token belongs to
    pub sentence_idx: usize,
    /// Token index within its sentence
    pub token_idx: usize,
}

impl Token {
    /// Create a new, untagged token
    pub fn new(text: impl Into<String>, sentence_idx: usize, token_idx: usize) -> Self {
        Self {
            text: text.into(),
            pos: None,
            sentence_idx,
            token_idx,
        }
    }

    /// Attach a part-of-speech tag
    pub fn with_pos(mut self, pos: PosTag) -> Self {
        self.pos = Some(pos);
        self
    }

    /// The tag, or [`PosTag::Unknown`] if the token was never tagged
    pub fn pos_or_unknown(&self) -> PosTag {
        self.pos.unwrap_or(PosTag::Unknown)
    }
}

// ============================================================================
// Document
// ============================================================================

/// An index-aligned view of the input text.
///
/// Position `i` in `originals`, `processed` and `tags` always refers to the same
/// sentence. Every downstream structure is keyed by that index, never by the
/// sentence text, so duplicate sentences stay distinct.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    originals: Vec<String>,
    processed: Vec<String>,
    tags: Vec<Vec<PosTag>>,
}

impl Document {
    /// Build a document from its three parallel sequences
    pub fn new(
        originals: Vec<String>,
        processed: Vec<String>,
        tags: Vec<Vec<PosTag>>,
    ) -> Result<Self> {
        if originals.len() != processed.len() || originals.len() != tags.len() {
            return Err(SummarizerError::invalid_document(format!(
                "{} original sentences, {} processed sentences, {} tag lists",
                originals.len(),
                processed.len(),
                tags.len()
            )));
        }

        Ok(Self {
            originals,
            processed,
            tags,
        })
    }

    /// A document with no sentences
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    /// Check if the document has no sentences
    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Original sentences in document order
    pub fn originals(&self) -> &[String] {
        &self.originals
    }

    /// Processed (stopword-free, lemmatized, lowercase) sentences
    pub fn processed(&self) -> &[String] {
        &self.processed
    }

    /// Per-sentence POS tag lists
    pub fn tags(&self) -> &[Vec<PosTag>] {
        &self.tags
    }

    /// Original text of sentence `index`
    pub fn original(&self, index: usize) -> Option<&str> {
        self.originals.get(index).map(String::as_str)
    }
}

// ============================================================================
// Threshold strategy
// ============================================================================

/// How the edge threshold of the similarity graph is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ThresholdStrategy {
    /// Value at this percentile of all pairwise similarities (0.5 = median)
    Percentile(f64),
    /// A constant threshold
    Fixed(f64),
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        ThresholdStrategy::Percentile(0.5)
    }
}

// ============================================================================
// Summary length policy
// ============================================================================

/// How many sentences a summary keeps
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SummaryLength {
    /// Short texts keep proportionally more, long texts compress harder
    #[default]
    Tiered,
    /// `ceil(n * ratio)`, at least one sentence
    Ratio(f64),
    /// A fixed sentence count
    Fixed(usize),
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the summarization pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Damping factor for rank propagation
    pub damping: f64,
    /// Maximum propagation rounds
    pub max_iterations: usize,
    /// Stop once the largest per-sentence change drops below this
    pub convergence_threshold: f64,
    /// Edge threshold strategy for the similarity graph
    pub threshold: ThresholdStrategy,
    /// Strength `k` of the quadratic position decay `1 - k * (i/n)^2`
    pub position_bias_strength: f64,
    /// Sentences up to this many words get no length penalty
    pub optimal_sentence_length: usize,
    /// Sentences beyond this many words get the flat penalty
    pub max_sentence_length: usize,
    /// Multiplier applied to sentences longer than `max_sentence_length`
    pub long_sentence_penalty: f64,
    /// Weight of the important-tag ratio in the POS factor
    pub pos_boost_factor: f64,
    /// Upper bound on the POS factor
    pub max_pos_multiplier: f64,
    /// Summary length policy
    pub summary_length: SummaryLength,
    /// Sentence count from which vectorization and similarity run on rayon
    pub parallel_threshold: usize,
    /// Reject documents with more sentences than this
    pub max_sentences: Option<usize>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 0.001,
            threshold: ThresholdStrategy::default(),
            position_bias_strength: 0.3,
            optimal_sentence_length: 20,
            max_sentence_length: 40,
            long_sentence_penalty: 0.5,
            pos_boost_factor: 0.4,
            max_pos_multiplier: 2.0,
            summary_length: SummaryLength::Tiered,
            parallel_threshold: 64,
            max_sentences: None,
        }
    }
}

impl SummarizerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SummarizerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(SummarizerError::invalid_config(format!(
                "damping must be between 0 and 1, got {}",
                self.damping
            )));
        }

        if self.max_iterations == 0 {
            return Err(SummarizerError::invalid_config("max_iterations must be > 0"));
        }

        if !(self.convergence_threshold > 0.0) {
            return Err(SummarizerError::invalid_config(
                "convergence_threshold must be > 0",
            ));
        }

        match self.threshold {
            ThresholdStrategy::Percentile(p) if !(0.0..=1.0).contains(&p) => {
                return Err(SummarizerError::invalid_config(format!(
                    "threshold percentile must be between 0 and 1, got {}",
                    p
                )));
            }
            ThresholdStrategy::Fixed(t) if !t.is_finite() => {
                return Err(SummarizerError::invalid_config(
                    "fixed threshold must be finite",
                ));
            }
            _ => {}
        }

        if !(self.position_bias_strength > 0.0 && self.position_bias_strength <= 1.0) {
            return Err(SummarizerError::invalid_config(format!(
                "position_bias_strength must be in (0, 1], got {}",
                self.position_bias_strength
            )));
        }

        if self.max_sentence_length <= self.optimal_sentence_length {
            return Err(SummarizerError::invalid_config(
                "max_sentence_length must be > optimal_sentence_length",
            ));
        }

        if !(self.long_sentence_penalty > 0.0 && self.long_sentence_penalty <= 1.0) {
            return Err(SummarizerError::invalid_config(
                "long_sentence_penalty must be in (0, 1]",
            ));
        }

        if !(self.pos_boost_factor >= 0.0) {
            return Err(SummarizerError::invalid_config(
                "pos_boost_factor must be >= 0",
            ));
        }

        if !(self.max_pos_multiplier > 0.0) {
            return Err(SummarizerError::invalid_config(
                "max_pos_multiplier must be > 0",
            ));
        }

        match self.summary_length {
            SummaryLength::Ratio(r) if !(r > 0.0 && r <= 1.0) => {
                return Err(SummarizerError::invalid_config(format!(
                    "summary ratio must be in (0, 1], got {}",
                    r
                )));
            }
            SummaryLength::Fixed(0) => {
                return Err(SummarizerError::invalid_config(
                    "fixed summary length must be > 0",
                ));
            }
            _ => {}
        }

        if self.max_sentences == Some(0) {
            return Err(SummarizerError::invalid_config("max_sentences must be > 0"));
        }

        Ok(())
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set max iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set convergence threshold
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Builder method: set the edge threshold strategy
    pub fn with_threshold(mut self, threshold: ThresholdStrategy) -> Self {
        self.threshold = threshold;
        self
    }

    /// Builder method: set position bias strength
    pub fn with_position_bias_strength(mut self, strength: f64) -> Self {
        self.position_bias_strength = strength;
        self
    }

    /// Builder method: set summary length policy
    pub fn with_summary_length(mut self, summary_length: SummaryLength) -> Self {
        self.summary_length = summary_length;
        self
    }

    /// Builder method: set the parallel threshold
    pub fn with_parallel_threshold(mut self, sentences: usize) -> Self {
        self.parallel_threshold = sentences;
        self
    }

    /// Builder method: set maximum sentence limit
    pub fn with_max_sentences(mut self, max: usize) -> Self {
        self.max_sentences = Some(max);
        self
    }
}
