//! TF-IDF vector space for sentences
//!
//! Every processed sentence becomes a dense vector over the sorted document
//! vocabulary. Dimensions hold `tf * idf` where `tf` is the raw token count in
//! the sentence and `idf = ln(N / (df + 1))`. With the `+ 1` smoothing a term
//! present in every sentence gets a slightly negative weight; that is kept as
//! is.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Sentences below this count are vectorized sequentially
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Dense TF-IDF vectors aligned with a sorted vocabulary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorSpace {
    /// Distinct processed tokens in lexicographic order
    pub vocabulary: Vec<String>,
    /// One vector per sentence, each `vocabulary.len()` long
    pub vectors: Vec<Vec<f64>>,
    /// Inverse document frequency per vocabulary entry
    pub idf: Vec<f64>,
}

impl VectorSpace {
    /// Number of sentence vectors
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if there are no vectors
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Number of dimensions
    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vector of sentence `index`
    pub fn vector(&self, index: usize) -> Option<&[f64]> {
        self.vectors.get(index).map(Vec::as_slice)
    }

    /// Position of `term` in the vocabulary
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|entry| entry.as_str().cmp(term))
            .ok()
    }
}

/// Builds a [`VectorSpace`] from processed sentences
#[derive(Debug, Clone)]
pub struct VectorSpaceBuilder {
    parallel_threshold: usize,
}

impl Default for VectorSpaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorSpaceBuilder {
    /// Create a builder with the default parallel threshold
    pub fn new() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the sentence count from which vectorization runs on rayon
    pub fn with_parallel_threshold(mut self, sentences: usize) -> Self {
        self.parallel_threshold = sentences;
        self
    }

    /// Build vectors for the processed sentences
    pub fn build(&self, processed: &[String]) -> VectorSpace {
        let n = processed.len();
        if n == 0 {
            return VectorSpace::default();
        }

        let tokenized: Vec<Vec<String>> = processed
            .iter()
            .map(|s| s.split_whitespace().map(str::to_lowercase).collect())
            .collect();

        let mut vocabulary: Vec<String> = tokenized.iter().flatten().cloned().collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();

        let index: FxHashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        // Document frequency counts membership, so each sentence counts a term once
        let mut doc_count = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let mut seen = vec![false; vocabulary.len()];
            for token in tokens {
                if let Some(&i) = index.get(token.as_str()) {
                    if !seen[i] {
                        seen[i] = true;
                        doc_count[i] += 1;
                    }
                }
            }
        }

        let total = n as f64;
        let idf: Vec<f64> = doc_count
            .iter()
            .map(|&df| (total / (df as f64 + 1.0)).ln())
            .collect();

        let vectorize = |tokens: &Vec<String>| -> Vec<f64> {
            let mut tf = vec![0.0; idf.len()];
            for token in tokens {
                if let Some(&i) = index.get(token.as_str()) {
                    tf[i] += 1.0;
                }
            }
            tf.iter_mut().zip(&idf).for_each(|(v, w)| *v *= w);
            tf
        };

        let vectors: Vec<Vec<f64>> = if n < self.parallel_threshold {
            tokenized.iter().map(vectorize).collect()
        } else {
            tokenized.par_iter().map(vectorize).collect()
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sentences = n,
            vocabulary = vocabulary.len(),
            "built tf-idf vectors"
        );

        VectorSpace {
            vocabulary,
            vectors,
            idf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_sorted_and_unique() {
        let space = VectorSpaceBuilder::new().build(&sentences(&["cat sat", "dog sat cat"]));

        assert_eq!(space.vocabulary, vec!["cat", "dog", "sat"]);
        assert_eq!(space.len(), 2);
        assert!(space.vectors.iter().all(|v| v.len() == 3));
    }

    #[test]
    fn test_idf_formula() {
        // N = 3; "cat" in 3 sentences, "dog" in 1
        let space = VectorSpaceBuilder::new().build(&sentences(&["cat dog", "cat", "cat"]));

        let cat = space.term_index("cat").unwrap();
        let dog = space.term_index("dog").unwrap();

        assert!((space.idf[cat] - (3.0f64 / 4.0).ln()).abs() < 1e-12);
        assert!(space.idf[cat] < 0.0);
        assert!((space.idf[dog] - (3.0f64 / 2.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_term_frequency_counts_repeats() {
        let space = VectorSpaceBuilder::new().build(&sentences(&["run run run", "walk"]));

        let run = space.term_index("run").unwrap();
        let expected = 3.0 * (2.0f64 / 2.0).ln();
        assert!((space.vectors[0][run] - expected).abs() < 1e-12);
        assert_eq!(space.vectors[1][run], 0.0);
    }

    #[test]
    fn test_doc_count_uses_token_membership() {
        // "cat" is a substring of "category" but must not count there
        let space = VectorSpaceBuilder::new().build(&sentences(&["cat", "category", "dog"]));

        let cat = space.term_index("cat").unwrap();
        assert!((space.idf[cat] - (3.0f64 / 2.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sentence_has_zero_vector() {
        let space = VectorSpaceBuilder::new().build(&sentences(&["", "cat"]));

        assert_eq!(space.dimensions(), 1);
        assert_eq!(space.vector(0), Some(&[0.0][..]));
    }

    #[test]
    fn test_no_sentences() {
        let space = VectorSpaceBuilder::new().build(&[]);
        assert!(space.is_empty());
        assert_eq!(space.dimensions(), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let docs: Vec<String> = (0..80)
            .map(|i| format!("term{} shared word{} term{}", i % 7, i % 5, i % 3))
            .collect();

        let sequential = VectorSpaceBuilder::new()
            .with_parallel_threshold(usize::MAX)
            .build(&docs);
        let parallel = VectorSpaceBuilder::new().with_parallel_threshold(1).build(&docs);

        assert_eq!(sequential, parallel);
    }
}
