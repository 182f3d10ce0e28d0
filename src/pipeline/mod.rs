//! Summarization pipeline
//!
//! The [`runner::Summarizer`] composes the stages; [`observer`] exposes stage
//! boundaries for timing and inspection.

pub mod observer;
pub mod runner;
