//! Dictionary-backed lookups
//!
//! A [`Lexicon`] bundles the stopword list, the lemma dictionary and the POS
//! dictionary. Dictionaries are loaded once, up front, and never mutated
//! afterwards. Loading fails on the first unreadable file or malformed line so
//! a broken deployment is caught at startup rather than per request.
//!
//! File formats (one entry per line, `#` starts a comment line):
//!
//! | File | Shape |
//! |------|-------|
//! | `stopwords.csv` | comma-separated words, any number per line |
//! | `lemmatization_dictionary.csv` | `word,lemma` |
//! | `pos_dictionary.csv` | `word,TAG` (UD or Penn tag) |

use super::stopwords::StopwordFilter;
use super::{Lemmatize, PosLookup, StopwordLookup};
use crate::errors::{Result, SummarizerError};
use crate::types::PosTag;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use std::path::Path;
use std::sync::Arc;

/// Stopword list file name inside a lexicon directory
pub const STOPWORDS_FILE: &str = "stopwords.csv";
/// Lemma dictionary file name inside a lexicon directory
pub const LEMMAS_FILE: &str = "lemmatization_dictionary.csv";
/// POS dictionary file name inside a lexicon directory
pub const POS_FILE: &str = "pos_dictionary.csv";

static GLOBAL_LEXICON: OnceCell<Arc<Lexicon>> = OnceCell::new();

// ============================================================================
// Lemma dictionary
// ============================================================================

/// Word → lemma dictionary (keys and values lowercase)
#[derive(Debug, Clone, Default)]
pub struct LemmaDictionary {
    entries: FxHashMap<String, String>,
}

impl LemmaDictionary {
    /// Create an empty dictionary (every word is its own lemma)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(word, lemma)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| {
                (
                    k.as_ref().trim().to_lowercase(),
                    v.as_ref().trim().to_lowercase(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lemmatize for LemmaDictionary {
    fn lemmatize(&self, word: &str) -> String {
        self.entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_else(|| word.to_string())
    }
}

// ============================================================================
// POS dictionary
// ============================================================================

/// Word → part-of-speech dictionary
#[derive(Debug, Clone, Default)]
pub struct PosDictionary {
    entries: FxHashMap<String, PosTag>,
}

impl PosDictionary {
    /// Create an empty dictionary (every word is [`PosTag::Unknown`])
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(word, tag)` pairs
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, PosTag)>,
        K: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, tag)| (k.as_ref().trim().to_lowercase(), tag))
            .collect();
        Self { entries }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PosLookup for PosDictionary {
    fn pos_tag(&self, word: &str) -> PosTag {
        self.entries
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(PosTag::Unknown)
    }
}

// ============================================================================
// Lexicon
// ============================================================================

/// Stopwords, lemmas and POS tags behind the three lookup traits
#[derive(Debug, Clone)]
pub struct Lexicon {
    stopwords: StopwordFilter,
    lemmas: LemmaDictionary,
    pos: PosDictionary,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

impl Lexicon {
    /// Assemble a lexicon from its parts
    pub fn new(stopwords: StopwordFilter, lemmas: LemmaDictionary, pos: PosDictionary) -> Self {
        Self {
            stopwords,
            lemmas,
            pos,
        }
    }

    /// Built-in English stopwords with empty lemma and POS dictionaries.
    ///
    /// Without a POS dictionary every content word tags as
    /// [`PosTag::Unknown`] and gets the low unknown weight, while a sentence
    /// made only of stopwords has no tags at all and keeps a neutral POS
    /// factor. Such filler sentences can then outrank real content. Supply
    /// tags with [`Lexicon::with_pos_tags`] or [`Lexicon::from_dir`] when the
    /// POS bias matters.
    pub fn english() -> Self {
        Self::new(
            StopwordFilter::english(),
            LemmaDictionary::new(),
            PosDictionary::new(),
        )
    }

    /// Replace the lemma dictionary
    pub fn with_lemmas(mut self, lemmas: LemmaDictionary) -> Self {
        self.lemmas = lemmas;
        self
    }

    /// Replace the POS dictionary
    pub fn with_pos_tags(mut self, pos: PosDictionary) -> Self {
        self.pos = pos;
        self
    }

    /// Load all three dictionaries from `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let stopwords = parse_word_list(&read_file(&dir.join(STOPWORDS_FILE))?);
        let lemmas = parse_key_values(LEMMAS_FILE, &read_file(&dir.join(LEMMAS_FILE))?)?;
        let pos = parse_key_values(POS_FILE, &read_file(&dir.join(POS_FILE))?)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            dir = %dir.display(),
            stopwords = stopwords.len(),
            lemmas = lemmas.len(),
            pos_tags = pos.len(),
            "loaded lexicon"
        );

        Ok(Self::new(
            StopwordFilter::from_words(stopwords),
            LemmaDictionary::from_pairs(lemmas),
            PosDictionary::from_pairs(pos.into_iter().map(|(w, t)| (w, PosTag::parse(&t)))),
        ))
    }

    /// The stopword filter
    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    /// The lemma dictionary
    pub fn lemmas(&self) -> &LemmaDictionary {
        &self.lemmas
    }

    /// The POS dictionary
    pub fn pos(&self) -> &PosDictionary {
        &self.pos
    }
}

impl StopwordLookup for Lexicon {
    fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

impl Lemmatize for Lexicon {
    fn lemmatize(&self, word: &str) -> String {
        self.lemmas.lemmatize(word)
    }
}

impl PosLookup for Lexicon {
    fn pos_tag(&self, word: &str) -> PosTag {
        self.pos.pos_tag(word)
    }
}

// ============================================================================
// Process-wide lexicon
// ============================================================================

/// Install the process-wide lexicon. Fails if one is already installed.
pub fn install_global(lexicon: Lexicon) -> Result<Arc<Lexicon>> {
    let lexicon = Arc::new(lexicon);
    GLOBAL_LEXICON
        .set(Arc::clone(&lexicon))
        .map_err(|_| SummarizerError::LexiconAlreadyInstalled)?;
    Ok(lexicon)
}

/// The process-wide lexicon, if one was installed
pub fn global() -> Option<Arc<Lexicon>> {
    GLOBAL_LEXICON.get().cloned()
}

// ============================================================================
// File parsing
// ============================================================================

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SummarizerError::LexiconIo {
        path: path.to_path_buf(),
        source,
    })
}

fn content_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Parse a comma-separated word list
pub fn parse_word_list(content: &str) -> Vec<String> {
    content_lines(content)
        .flat_map(|(_, line)| line.split(','))
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Parse `key,value` lines. Keys are lowercased; extra columns are ignored.
pub fn parse_key_values(source_name: &str, content: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    for (line_no, line) in content_lines(content) {
        let mut fields = line.split(',').map(str::trim);
        match (fields.next(), fields.next()) {
            (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                pairs.push((key.to_lowercase(), value.to_string()));
            }
            _ => {
                return Err(SummarizerError::MalformedEntry {
                    source_name: source_name.to_string(),
                    line: line_no,
                    content: line.to_string(),
                });
            }
        }
    }

    Ok(pairs)
}
