//! Summarization components
//!
//! TF-IDF vectorization, heuristic re-scoring, sentence selection and result
//! assembly for extractive summaries.

pub mod assembler;
pub mod scorer;
pub mod selector;
pub mod tfidf;
