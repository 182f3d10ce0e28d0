//! Heuristic re-scoring of propagated ranks
//!
//! Graph centrality alone favours long, repetitive sentences. The scorer
//! multiplies each rank by three biases and then normalizes:
//!
//! 1. position: `1 - k * (i / n)^2`, earlier sentences decay less
//! 2. length: no penalty up to the optimal word count, a linear ramp down to
//!    the long-sentence penalty at the max length, flat beyond it
//! 3. part of speech: content-heavy sentences (nouns, proper nouns, numbers,
//!    verbs) are boosted
//!
//! The result sums to 1 unless every score is zero (or the sum is
//! non-positive), in which case the vector is returned unchanged.

use crate::types::{PosTag, SummarizerConfig};

/// Tags weighing more than this count as important
const IMPORTANT_WEIGHT: f64 = 1.0;
/// Diversity bonus per distinct important tag
const DIVERSITY_STEP: f64 = 0.05;
/// Cap on the diversity bonus
const MAX_DIVERSITY_BONUS: f64 = 0.2;

/// Weight of a tag in the POS factor
pub fn pos_weight(tag: PosTag) -> f64 {
    match tag {
        PosTag::ProperNoun => 1.6,
        PosTag::Noun => 1.3,
        PosTag::Numeral => 1.2,
        PosTag::Verb => 1.1,
        PosTag::Adjective => 0.9,
        PosTag::Auxiliary => 0.8,
        PosTag::Interjection => 0.8,
        PosTag::Adverb => 0.7,
        PosTag::Symbol => 0.5,
        PosTag::Pronoun => 0.4,
        PosTag::Preposition => 0.4,
        PosTag::Determiner => 0.3,
        PosTag::Conjunction => 0.3,
        PosTag::Particle => 0.3,
        PosTag::Other => 0.2,
        PosTag::Punctuation => 0.0,
        PosTag::Unknown => 0.6,
    }
}

/// Position, length and POS biases followed by sum normalization
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    position_bias_strength: f64,
    optimal_length: usize,
    max_length: usize,
    long_penalty: f64,
    pos_boost_factor: f64,
    max_pos_multiplier: f64,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::from_config(&SummarizerConfig::default())
    }
}

impl HeuristicScorer {
    /// Create a scorer with default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the heuristic constants from a config
    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self {
            position_bias_strength: config.position_bias_strength,
            optimal_length: config.optimal_sentence_length,
            max_length: config.max_sentence_length,
            long_penalty: config.long_sentence_penalty,
            pos_boost_factor: config.pos_boost_factor,
            max_pos_multiplier: config.max_pos_multiplier,
        }
    }

    /// Multiplier for sentence `index` of `total`
    pub fn position_factor(&self, index: usize, total: usize) -> f64 {
        if total == 0 {
            return 1.0;
        }
        let relative = index as f64 / total as f64;
        1.0 - self.position_bias_strength * relative * relative
    }

    /// Multiplier for a sentence of `words` words
    pub fn length_factor(&self, words: usize) -> f64 {
        if words <= self.optimal_length {
            1.0
        } else if words <= self.max_length {
            let span = (self.max_length - self.optimal_length) as f64;
            let over = (words - self.optimal_length) as f64;
            1.0 - (1.0 - self.long_penalty) * over / span
        } else {
            self.long_penalty
        }
    }

    /// Multiplier for a sentence's POS tags
    pub fn pos_factor(&self, tags: &[PosTag]) -> f64 {
        if tags.is_empty() {
            return 1.0;
        }

        let total = tags.len() as f64;
        let avg_weight = tags.iter().map(|&t| pos_weight(t)).sum::<f64>() / total;

        let mut distinct: Vec<PosTag> = Vec::new();
        let mut important = 0usize;
        for &tag in tags {
            if pos_weight(tag) > IMPORTANT_WEIGHT {
                important += 1;
                if !distinct.contains(&tag) {
                    distinct.push(tag);
                }
            }
        }

        let important_ratio = important as f64 / total;
        let diversity = (DIVERSITY_STEP * distinct.len() as f64).min(MAX_DIVERSITY_BONUS);
        let factor = avg_weight * (1.0 + important_ratio * self.pos_boost_factor + diversity);

        factor.min(self.max_pos_multiplier)
    }

    /// Apply the position bias in place
    pub fn apply_position_bias(&self, scores: &mut [f64]) {
        let total = scores.len();
        for (i, score) in scores.iter_mut().enumerate() {
            *score *= self.position_factor(i, total);
        }
    }

    /// Apply the length bias in place, using processed sentence word counts
    pub fn apply_length_bias(&self, scores: &mut [f64], processed: &[String]) {
        for (score, sentence) in scores.iter_mut().zip(processed) {
            *score *= self.length_factor(sentence.split_whitespace().count());
        }
    }

    /// Apply the POS bias in place
    pub fn apply_pos_bias(&self, scores: &mut [f64], tags: &[Vec<PosTag>]) {
        for (score, sentence_tags) in scores.iter_mut().zip(tags) {
            *score *= self.pos_factor(sentence_tags);
        }
    }

    /// Run all biases and normalize
    pub fn score(&self, ranks: &[f64], processed: &[String], tags: &[Vec<PosTag>]) -> Vec<f64> {
        let mut scores = ranks.to_vec();
        self.apply_position_bias(&mut scores);
        self.apply_length_bias(&mut scores, processed);
        self.apply_pos_bias(&mut scores, tags);
        normalize(&mut scores);
        scores
    }
}

/// Scale scores to sum to 1. Leaves them untouched when the sum is not positive.
pub fn normalize(scores: &mut [f64]) {
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for score in scores.iter_mut() {
            *score /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_factor() {
        let scorer = HeuristicScorer::new();

        assert!((scorer.position_factor(0, 4) - 1.0).abs() < 1e-12);
        assert!((scorer.position_factor(2, 4) - (1.0 - 0.3 * 0.25)).abs() < 1e-12);
        assert!(scorer.position_factor(3, 4) < scorer.position_factor(1, 4));
    }

    #[test]
    fn test_length_factor_boundaries() {
        let scorer = HeuristicScorer::new();

        assert_eq!(scorer.length_factor(0), 1.0);
        assert_eq!(scorer.length_factor(20), 1.0);
        assert!((scorer.length_factor(30) - 0.75).abs() < 1e-12);
        assert!((scorer.length_factor(40) - 0.5).abs() < 1e-12);
        assert_eq!(scorer.length_factor(41), 0.5);
        assert_eq!(scorer.length_factor(500), 0.5);
    }

    #[test]
    fn test_pos_factor_empty() {
        assert_eq!(HeuristicScorer::new().pos_factor(&[]), 1.0);
    }

    #[test]
    fn test_pos_factor_nouns() {
        // avg 1.3, ratio 1.0, one distinct important tag
        let factor = HeuristicScorer::new().pos_factor(&[PosTag::Noun, PosTag::Noun]);
        let expected = 1.3 * (1.0 + 0.4 + 0.05);
        assert!((factor - expected).abs() < 1e-12);
    }

    #[test]
    fn test_pos_factor_mixed() {
        // avg (1.6 + 0.3) / 2, ratio 0.5, one distinct important tag
        let factor = HeuristicScorer::new().pos_factor(&[PosTag::ProperNoun, PosTag::Determiner]);
        let expected = 0.95 * (1.0 + 0.5 * 0.4 + 0.05);
        assert!((factor - expected).abs() < 1e-12);
    }

    #[test]
    fn test_pos_factor_capped() {
        let tags = [
            PosTag::ProperNoun,
            PosTag::Noun,
            PosTag::Numeral,
            PosTag::Verb,
            PosTag::ProperNoun,
        ];
        assert_eq!(HeuristicScorer::new().pos_factor(&tags), 2.0);
    }

    #[test]
    fn test_pos_factor_unknown_only() {
        let factor = HeuristicScorer::new().pos_factor(&[PosTag::Unknown, PosTag::Unknown]);
        assert!((factor - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let mut scores = vec![1.0, 3.0];
        normalize(&mut scores);

        assert!((scores[0] - 0.25).abs() < 1e-12);
        assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_all_zero_unchanged() {
        let mut scores = vec![0.0, 0.0, 0.0];
        normalize(&mut scores);
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_score_pipeline() {
        let scorer = HeuristicScorer::new();
        let processed = vec!["cat sit".to_string(), "dog run".to_string()];
        let tags = vec![
            vec![PosTag::Noun, PosTag::Verb],
            vec![PosTag::Noun, PosTag::Verb],
        ];

        let scores = scorer.score(&[0.15, 0.15], &processed, &tags);

        assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // Same rank and tags, so only position separates them
        assert!(scores[0] > scores[1]);
        let ratio = scores[1] / scores[0];
        assert!((ratio - (1.0 - 0.3 * 0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_from_config() {
        let config = SummarizerConfig::default().with_position_bias_strength(1.0);
        let scorer = HeuristicScorer::from_config(&config);

        assert!((scorer.position_factor(1, 2) - 0.75).abs() < 1e-12);
    }
}
