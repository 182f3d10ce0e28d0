//! Rank propagation
//!
//! This module provides the damped TextRank iteration over the sentence graph.

pub mod propagator;

/// Result of a rank propagation run
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationResult {
    /// Scores for each sentence (indexed by sentence position)
    pub scores: Vec<f64>,
    /// Number of rounds performed
    pub iterations: usize,
    /// Largest per-sentence change in the last round
    pub delta: f64,
    /// Whether the change dropped below the convergence threshold
    pub converged: bool,
}

impl PropagationResult {
    /// Create a new propagation result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }
}
