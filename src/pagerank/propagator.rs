//! TextRank score propagation
//!
//! Every sentence starts at `1.0`. Each round recomputes all scores from the
//! previous round's values (Jacobi style):
//!
//! ```text
//! new(s) = (1 - d) + d * Σ score(n) / degree(n)   for n in neighbors(s)
//! ```
//!
//! Scores are not normalized here; isolated sentences settle at `1 - d`.
//! Iteration stops once the largest per-sentence change falls below the
//! convergence threshold or after `max_iterations` rounds.

use super::PropagationResult;
use crate::graph::csr::CsrGraph;

/// Damped rank propagation over an undirected sentence graph
#[derive(Debug, Clone)]
pub struct RankPropagator {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of rounds
    pub max_iterations: usize,
    /// Convergence threshold on the max absolute change
    pub threshold: f64,
}

impl Default for RankPropagator {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 0.001,
        }
    }
}

impl RankPropagator {
    /// Create a new RankPropagator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run propagation on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> PropagationResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PropagationResult::new(vec![], 0, 0.0, true);
        }

        let mut scores = vec![1.0; n];
        let mut new_scores = vec![0.0; n];
        let base = 1.0 - self.damping;

        let mut iterations = 0;
        let mut delta = f64::MAX;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            for (node, slot) in new_scores.iter_mut().enumerate() {
                let incoming: f64 = graph
                    .neighbors(node as u32)
                    .map(|(neighbor, _)| scores[neighbor as usize] / graph.degree(neighbor) as f64)
                    .sum();
                *slot = base + self.damping * incoming;
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .fold(0.0, f64::max);

            // Swap buffers
            std::mem::swap(&mut scores, &mut new_scores);

            if delta < self.threshold {
                converged = true;
                break;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(iterations, delta, converged, "rank propagation finished");

        PropagationResult::new(scores, iterations, delta, converged)
    }
}
