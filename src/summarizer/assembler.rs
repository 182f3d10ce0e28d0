//! Summary result assembly
//!
//! Packages the selected sentences, the full rank list, a node/link view of
//! the similarity graph and word-count statistics into a [`SummaryResult`].

use crate::errors::Result;
use crate::graph::csr::CsrGraph;
use crate::types::Document;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static LEADING_PERIODS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\.[.\s]*").ok());

/// One sentence and its final score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceRank {
    /// Position in the document
    pub index: usize,
    /// Original sentence text
    pub sentence: String,
    /// Final (normalized) score
    pub rank: f64,
}

/// A graph node for visualization (1-based id)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: usize,
    pub rank: f64,
}

/// An undirected graph edge for visualization (1-based ids, `source < target`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    pub source: usize,
    pub target: usize,
}

/// Propagation diagnostics carried into the result
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RankDiagnostics {
    /// Edge threshold, `None` when there were no sentence pairs
    pub threshold: Option<f64>,
    /// Propagation rounds performed
    pub iterations: usize,
    /// Whether propagation converged
    pub converged: bool,
}

/// Final output of a summarization run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    /// Summary text
    pub summary: String,
    /// Indices of the selected sentences, ascending
    pub selected: Vec<usize>,
    pub original_sentence_count: usize,
    pub summarized_sentence_count: usize,
    pub original_word_count: usize,
    pub summarized_word_count: usize,
    /// `1 - summarized / original` words, `0.0` for empty input
    pub reduction_rate: f64,
    /// Every sentence, highest score first
    pub sentence_ranks: Vec<SentenceRank>,
    pub graph_nodes: Vec<GraphNode>,
    pub graph_links: Vec<GraphLink>,
    #[serde(flatten)]
    pub diagnostics: RankDiagnostics,
}

impl SummaryResult {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Join sentences with single spaces.
///
/// Whitespace inside each sentence is collapsed. A period doubled across a
/// seam ("One." then ".Two.") is collapsed to one; sentence text is otherwise
/// kept verbatim, so an ellipsis survives.
pub fn join_sentences<S: AsRef<str>>(sentences: &[S]) -> String {
    let mut summary = String::new();

    for sentence in sentences {
        let collapsed = sentence
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if collapsed.is_empty() {
            continue;
        }

        let doubled = summary
            .ends_with('.')
            .then(|| LEADING_PERIODS.as_ref().and_then(|re| re.find(&collapsed)))
            .flatten();
        match doubled {
            Some(m) => summary.push_str(&collapsed[m.end()..]),
            None => {
                if !summary.is_empty() {
                    summary.push(' ');
                }
                summary.push_str(&collapsed);
            }
        }
    }

    summary
}

/// Whitespace-separated word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Fraction of words removed, `0.0` when the original has none
pub fn reduction_rate(original_words: usize, summarized_words: usize) -> f64 {
    if original_words == 0 {
        return 0.0;
    }
    1.0 - summarized_words as f64 / original_words as f64
}

/// Builds [`SummaryResult`] values
#[derive(Debug, Clone, Default)]
pub struct ResultAssembler;

impl ResultAssembler {
    /// Create a new assembler
    pub fn new() -> Self {
        Self
    }

    /// Assemble the result of a full pipeline run
    pub fn assemble(
        &self,
        text: &str,
        doc: &Document,
        scores: &[f64],
        selected: &[usize],
        graph: &CsrGraph,
        diagnostics: RankDiagnostics,
    ) -> SummaryResult {
        let chosen: Vec<&str> = selected
            .iter()
            .filter_map(|&i| doc.original(i))
            .collect();
        let summary = join_sentences(&chosen);

        let graph_links = graph
            .edges()
            .map(|(a, b)| GraphLink {
                source: a as usize + 1,
                target: b as usize + 1,
            })
            .collect();

        self.finish(text, doc, scores, selected.to_vec(), summary, graph_links, diagnostics)
    }

    /// Result for documents with at most one sentence: the text is returned as is
    pub fn passthrough(&self, text: &str, doc: &Document) -> SummaryResult {
        let scores = vec![1.0; doc.len()];
        let selected: Vec<usize> = (0..doc.len()).collect();
        let summary = doc.originals().join(" ");

        self.finish(
            text,
            doc,
            &scores,
            selected,
            summary,
            Vec::new(),
            RankDiagnostics {
                threshold: None,
                iterations: 0,
                converged: true,
            },
        )
    }

    /// Rank list sorted by score descending, ties by index
    pub fn sentence_ranks(&self, doc: &Document, scores: &[f64]) -> Vec<SentenceRank> {
        let mut ranks: Vec<SentenceRank> = doc
            .originals()
            .iter()
            .zip(scores)
            .enumerate()
            .map(|(index, (sentence, &rank))| SentenceRank {
                index,
                sentence: sentence.clone(),
                rank,
            })
            .collect();
        ranks.sort_by(|a, b| b.rank.total_cmp(&a.rank).then(a.index.cmp(&b.index)));
        ranks
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        text: &str,
        doc: &Document,
        scores: &[f64],
        selected: Vec<usize>,
        summary: String,
        graph_links: Vec<GraphLink>,
        diagnostics: RankDiagnostics,
    ) -> SummaryResult {
        let original_word_count = word_count(text);
        let summarized_word_count = word_count(&summary);

        let graph_nodes = scores
            .iter()
            .enumerate()
            .map(|(i, &rank)| GraphNode { id: i + 1, rank })
            .collect();

        SummaryResult {
            original_sentence_count: doc.len(),
            summarized_sentence_count: selected.len(),
            original_word_count,
            summarized_word_count,
            reduction_rate: reduction_rate(original_word_count, summarized_word_count),
            sentence_ranks: self.sentence_ranks(doc, scores),
            graph_nodes,
            graph_links,
            selected,
            summary,
            diagnostics,
        }
    }
}
