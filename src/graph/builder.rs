//! Sentence similarity graph construction
//!
//! Nodes are sentence indices. Two sentences are linked when the cosine
//! similarity of their TF-IDF vectors strictly exceeds a threshold, which is
//! derived from the distribution of all pairwise similarities unless a fixed
//! value is configured.

use crate::summarizer::tfidf::{VectorSpace, DEFAULT_PARALLEL_THRESHOLD};
use crate::types::ThresholdStrategy;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Similarity of one unordered sentence pair, `i < j`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairSimilarity {
    pub i: usize,
    pub j: usize,
    pub similarity: f64,
}

/// Cosine similarity of two equally sized vectors.
///
/// Returns `0.0` when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// All unordered pair similarities in row-major order
pub fn pairwise_similarities(vectors: &[Vec<f64>], parallel_threshold: usize) -> Vec<PairSimilarity> {
    let n = vectors.len();
    let row = |i: usize| -> Vec<PairSimilarity> {
        (i + 1..n)
            .map(|j| PairSimilarity {
                i,
                j,
                similarity: cosine_similarity(&vectors[i], &vectors[j]),
            })
            .collect()
    };

    if n < parallel_threshold {
        (0..n).flat_map(row).collect()
    } else {
        // Rows are collected in order, so the flattening stays row-major
        let rows: Vec<Vec<PairSimilarity>> = (0..n).into_par_iter().map(row).collect();
        rows.into_iter().flatten().collect()
    }
}

/// Threshold at `percentile` of the sorted similarities.
///
/// Picks the value at index `floor(P * percentile)` of the ascending order,
/// clamped to the last index. Returns `None` when there are no pairs.
pub fn dynamic_threshold(similarities: &[f64], percentile: f64) -> Option<f64> {
    if similarities.is_empty() {
        return None;
    }

    let mut sorted = similarities.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let idx = ((sorted.len() as f64 * percentile).floor() as usize).min(sorted.len() - 1);
    Some(sorted[idx])
}

/// Build the graph over `n` sentences from precomputed pair similarities
pub fn build_graph(n: usize, threshold: f64, similarities: &[PairSimilarity]) -> SimilarityGraph {
    let mut graph = SimilarityGraph::new(n);
    graph.threshold = threshold;

    for pair in similarities {
        if pair.similarity > threshold {
            graph.add_edge(pair.i, pair.j, pair.similarity);
        }
    }

    graph
}

/// Undirected sentence graph keyed by sentence index
#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    /// Adjacency per node: neighbor index -> similarity
    adjacency: Vec<FxHashMap<u32, f64>>,
    /// Threshold edges had to exceed
    pub threshold: f64,
}

impl SimilarityGraph {
    /// Create a graph with `n` isolated nodes
    pub fn new(n: usize) -> Self {
        Self {
            adjacency: vec![FxHashMap::default(); n],
            threshold: 0.0,
        }
    }

    /// Add an undirected edge. Self-loops and out-of-range nodes are ignored.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) {
        if a == b || a >= self.adjacency.len() || b >= self.adjacency.len() {
            return;
        }
        self.adjacency[a].insert(b as u32, weight);
        self.adjacency[b].insert(a as u32, weight);
    }

    /// Check whether `a` and `b` are linked
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|edges| edges.contains_key(&(b as u32)))
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|edges| edges.len()).sum::<usize>() / 2
    }

    /// Neighbors of a node (unordered)
    pub fn edges_of(&self, node: usize) -> Option<&FxHashMap<u32, f64>> {
        self.adjacency.get(node)
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Builds a [`SimilarityGraph`] from a [`VectorSpace`]
#[derive(Debug, Clone)]
pub struct SimilarityGraphBuilder {
    strategy: ThresholdStrategy,
    parallel_threshold: usize,
}

impl Default for SimilarityGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityGraphBuilder {
    /// Create a builder using the median similarity as threshold
    pub fn new() -> Self {
        Self {
            strategy: ThresholdStrategy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the threshold strategy
    pub fn with_strategy(mut self, strategy: ThresholdStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the sentence count from which pair similarities run on rayon
    pub fn with_parallel_threshold(mut self, sentences: usize) -> Self {
        self.parallel_threshold = sentences;
        self
    }

    /// Build the graph for every sentence in `space`
    pub fn build(&self, space: &VectorSpace) -> SimilarityGraph {
        let n = space.len();
        let pairs = pairwise_similarities(&space.vectors, self.parallel_threshold);

        let threshold = match self.strategy {
            ThresholdStrategy::Percentile(p) => {
                let values: Vec<f64> = pairs.iter().map(|pair| pair.similarity).collect();
                // With no pairs there is nothing to link; the value is irrelevant
                dynamic_threshold(&values, p).unwrap_or(0.0)
            }
            ThresholdStrategy::Fixed(t) => t,
        };

        let graph = build_graph(n, threshold, &pairs);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = n,
            pairs = pairs.len(),
            edges = graph.edge_count(),
            threshold,
            "built similarity graph"
        );

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::tfidf::VectorSpaceBuilder;

    #[test]
    fn test_cosine_identical_and_orthogonal() {
        let a = [1.0, 2.0, 0.0];
        let b = [0.0, 0.0, 3.0];

        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&a, &b).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_cosine_negative_weights() {
        let sim = cosine_similarity(&[1.0, -1.0], &[-1.0, 1.0]);
        assert!((sim + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pairwise_row_major() {
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
        let pairs = pairwise_similarities(&vectors, usize::MAX);

        let order: Vec<(usize, usize)> = pairs.iter().map(|p| (p.i, p.j)).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_pairwise_parallel_matches_sequential() {
        let vectors: Vec<Vec<f64>> = (0..70)
            .map(|i| vec![(i % 3) as f64, (i % 5) as f64, 1.0])
            .collect();

        assert_eq!(
            pairwise_similarities(&vectors, usize::MAX),
            pairwise_similarities(&vectors, 1)
        );
    }

    #[test]
    fn test_dynamic_threshold_median_index() {
        // P = 4, index floor(4 * 0.5) = 2 of [0.1, 0.2, 0.3, 0.4]
        let t = dynamic_threshold(&[0.4, 0.1, 0.3, 0.2], 0.5).unwrap();
        assert!((t - 0.3).abs() < 1e-12);

        // P = 3, index 1
        let t = dynamic_threshold(&[0.9, 0.0, 0.5], 0.5).unwrap();
        assert!((t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_dynamic_threshold_clamped_and_empty() {
        assert_eq!(dynamic_threshold(&[], 0.5), None);
        assert_eq!(dynamic_threshold(&[0.2, 0.7], 1.0), Some(0.7));
    }

    #[test]
    fn test_build_graph_strictly_greater() {
        let pairs = vec![
            PairSimilarity { i: 0, j: 1, similarity: 0.5 },
            PairSimilarity { i: 0, j: 2, similarity: 0.6 },
            PairSimilarity { i: 1, j: 2, similarity: 0.4 },
        ];
        let graph = build_graph(3, 0.5, &pairs);

        assert!(!graph.has_edge(0, 1));
        assert!(graph.has_edge(0, 2));
        assert!(graph.has_edge(2, 0));
        assert!(!graph.has_edge(1, 2));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut graph = SimilarityGraph::new(2);
        graph.add_edge(1, 1, 1.0);
        graph.add_edge(0, 5, 1.0);

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_builder_disjoint_vocabulary_has_no_edges() {
        let space = VectorSpaceBuilder::new()
            .build(&["alpha beta".to_string(), "gamma delta".to_string()]);
        let graph = SimilarityGraphBuilder::new().build(&space);

        // Single pair with similarity 0, threshold 0, nothing strictly above
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.threshold, 0.0);
    }

    #[test]
    fn test_builder_fixed_threshold() {
        let space = VectorSpace {
            vocabulary: vec!["a".into(), "b".into()],
            vectors: vec![vec![1.0, 0.0], vec![1.0, 0.1], vec![0.0, 1.0]],
            idf: vec![1.0, 1.0],
        };
        let graph = SimilarityGraphBuilder::new()
            .with_strategy(ThresholdStrategy::Fixed(0.0))
            .build(&space);

        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(1, 2));
        assert!(!graph.has_edge(0, 2));
    }

    #[test]
    fn test_builder_single_sentence() {
        let space = VectorSpaceBuilder::new().build(&["only one".to_string()]);
        let graph = SimilarityGraphBuilder::new().build(&space);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }
}
