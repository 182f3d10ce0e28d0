//! Error types for rank_summarizer
//!
//! Degenerate inputs (empty text, zero vectors, all-zero scores) are handled
//! inside the pipeline and never show up here. These variants cover what a
//! caller can actually get wrong: configuration, dictionary files, and
//! documents that exceed a configured limit.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SummarizerError>;

/// Errors surfaced to callers of the summarizer
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A dictionary file could not be read
    #[error("failed to read lexicon file {path}: {source}")]
    LexiconIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dictionary line did not have the expected shape
    #[error("malformed entry in {source_name} at line {line}: {content:?}")]
    MalformedEntry {
        source_name: String,
        line: usize,
        content: String,
    },

    /// The process-wide lexicon was installed more than once
    #[error("global lexicon is already installed")]
    LexiconAlreadyInstalled,

    /// Parallel sentence sequences disagree in length
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The document has more sentences than the configured limit
    #[error("document has {sentences} sentences, limit is {limit}")]
    DocumentTooLarge { sentences: usize, limit: usize },
}

impl SummarizerError {
    /// Shorthand for [`SummarizerError::InvalidConfig`]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        SummarizerError::InvalidConfig(message.into())
    }

    /// Shorthand for [`SummarizerError::InvalidDocument`]
    pub fn invalid_document(message: impl Into<String>) -> Self {
        SummarizerError::InvalidDocument(message.into())
    }
}
