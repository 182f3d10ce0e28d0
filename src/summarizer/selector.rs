//! Summary sentence selection
//!
//! Decides how many sentences to keep and which ones: the top-scoring
//! sentences, emitted in their original document order.

use crate::types::SummaryLength;

/// Picks the sentences that make up the summary
#[derive(Debug, Clone, Default)]
pub struct SummarySelector {
    length: SummaryLength,
}

impl SummarySelector {
    /// Create a selector with the tiered length policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the summary length policy
    pub fn with_length(mut self, length: SummaryLength) -> Self {
        self.length = length;
        self
    }

    /// Number of sentences to keep from a document of `n` sentences.
    ///
    /// Never exceeds `n`; zero only when `n` is zero.
    pub fn target_length(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }

        let k = match self.length {
            SummaryLength::Tiered => tiered_length(n),
            SummaryLength::Ratio(ratio) => ((n as f64 * ratio).ceil() as usize).max(1),
            SummaryLength::Fixed(k) => k,
        };

        k.min(n)
    }

    /// Indices of the `k` best scores, ascending.
    ///
    /// Higher score wins; equal scores prefer the earlier sentence.
    pub fn select(&self, scores: &[f64], k: usize) -> Vec<usize> {
        let mut ranked: Vec<usize> = (0..scores.len()).collect();
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
        ranked.truncate(k);
        ranked.sort_unstable();
        ranked
    }
}

fn tiered_length(n: usize) -> usize {
    if n <= 3 {
        n.saturating_sub(1).max(1)
    } else if n <= 10 {
        (n / 2).max(3)
    } else {
        (n / 3).max(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiered_target_length() {
        let selector = SummarySelector::new();

        let expected = [
            (0, 0),
            (1, 1),
            (2, 1),
            (3, 2),
            (4, 3),
            (6, 3),
            (7, 3),
            (8, 4),
            (10, 5),
            (11, 5),
            (15, 5),
            (16, 5),
            (18, 6),
            (30, 10),
        ];
        for (n, k) in expected {
            assert_eq!(selector.target_length(n), k, "n = {n}");
        }
    }

    #[test]
    fn test_ratio_target_length() {
        let selector = SummarySelector::new().with_length(SummaryLength::Ratio(0.6));

        assert_eq!(selector.target_length(0), 0);
        assert_eq!(selector.target_length(1), 1);
        assert_eq!(selector.target_length(5), 3);
        assert_eq!(selector.target_length(6), 4);

        let tiny = SummarySelector::new().with_length(SummaryLength::Ratio(0.01));
        assert_eq!(tiny.target_length(10), 1);
    }

    #[test]
    fn test_fixed_target_length_clamped() {
        let selector = SummarySelector::new().with_length(SummaryLength::Fixed(4));

        assert_eq!(selector.target_length(10), 4);
        assert_eq!(selector.target_length(2), 2);
    }

    #[test]
    fn test_select_document_order() {
        let selector = SummarySelector::new();
        let selected = selector.select(&[0.1, 0.4, 0.2, 0.3], 2);

        assert_eq!(selected, vec![1, 3]);
    }

    #[test]
    fn test_select_ties_prefer_lower_index() {
        let selector = SummarySelector::new();
        let selected = selector.select(&[0.25, 0.25, 0.25, 0.25], 2);

        assert_eq!(selected, vec![0, 1]);
    }

    #[test]
    fn test_select_more_than_available() {
        let selector = SummarySelector::new();

        assert_eq!(selector.select(&[0.5, 0.5], 5), vec![0, 1]);
        assert!(selector.select(&[], 3).is_empty());
        assert!(selector.select(&[0.9], 0).is_empty());
    }
}
