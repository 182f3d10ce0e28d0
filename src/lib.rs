//! # rank_summarizer
//!
//! Extractive summarization with TextRank over a sentence-similarity graph.
//!
//! Sentences are turned into TF-IDF vectors, linked when their cosine
//! similarity beats the median pair similarity, and ranked by damped score
//! propagation. Position, length and part-of-speech heuristics adjust the
//! ranks before the best sentences are returned in document order.
//!
//! ```
//! use rank_summarizer::Summarizer;
//!
//! let text = "Rust is a systems language. Rust is fast and memory safe. \
//!             The borrow checker keeps Rust code memory safe. Lunch was good.";
//! let result = Summarizer::new().summarize(text).unwrap();
//! assert_eq!(result.summarized_sentence_count, 3);
//! ```

pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod summarizer;
pub mod types;

pub use errors::{Result, SummarizerError};
pub use nlp::lexicon::Lexicon;
pub use nlp::{Lemmatize, PosLookup, StopwordLookup};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use pipeline::runner::Summarizer;
pub use summarizer::assembler::SummaryResult;
pub use types::{Document, PosTag, SummarizerConfig, SummaryLength, ThresholdStrategy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
