//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Summarizer`] owns one instance of every stage and calls them in a
//! fixed order:
//!
//! 1. Preprocess (sentences, processed sentences, POS tags)
//! 2. Vectorize (TF-IDF)
//! 3. Build the similarity graph
//! 4. Rank (damped propagation)
//! 5. Score (position, length and POS biases)
//! 6. Select
//! 7. Assemble the result
//!
//! Documents with zero or one sentence skip stages 2 to 6: the text is its
//! own summary.
//!
//! The lexicon sits behind an [`Arc`] and is only read, so a single
//! `Summarizer` can serve concurrent calls from many threads.

use crate::errors::{Result, SummarizerError};
use crate::graph::builder::SimilarityGraphBuilder;
use crate::graph::csr::CsrGraph;
use crate::nlp::lexicon::{self, Lexicon};
use crate::nlp::preprocessor::Preprocessor;
use crate::nlp::tokenizer::Tokenizer;
use crate::nlp::{Lemmatize, PosLookup, StopwordLookup};
use crate::pagerank::propagator::RankPropagator;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_ASSEMBLE,
    STAGE_GRAPH, STAGE_PREPROCESS, STAGE_RANK, STAGE_SCORE, STAGE_SELECT, STAGE_VECTORIZE,
};
use crate::summarizer::assembler::{RankDiagnostics, ResultAssembler, SummaryResult};
use crate::summarizer::scorer::HeuristicScorer;
use crate::summarizer::selector::SummarySelector;
use crate::summarizer::tfidf::VectorSpaceBuilder;
use crate::types::SummarizerConfig;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Summarizer
// ============================================================================

/// Extractive TextRank summarizer
#[derive(Debug, Clone)]
pub struct Summarizer<L = Lexicon> {
    lexicon: Arc<L>,
    config: SummarizerConfig,
    tokenizer: Tokenizer,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer {
    /// Summarizer with built-in English stopwords and default settings.
    ///
    /// The built-in lexicon has no POS dictionary, so the POS bias cannot
    /// tell content words apart (see [`Lexicon::english`]). Use
    /// [`Summarizer::with_lexicon`] with tagged dictionaries for better picks.
    pub fn new() -> Self {
        Self::with_lexicon(Arc::new(Lexicon::english()))
    }

    /// Summarizer backed by the process-wide lexicon, or the built-in English
    /// one when none was installed
    pub fn from_global() -> Self {
        match lexicon::global() {
            Some(lexicon) => Self::with_lexicon(lexicon),
            None => Self::new(),
        }
    }
}

impl<L> Summarizer<L>
where
    L: StopwordLookup + Lemmatize + PosLookup,
{
    /// Summarizer over a shared lexicon with default settings
    pub fn with_lexicon(lexicon: Arc<L>) -> Self {
        Self {
            lexicon,
            config: SummarizerConfig::default(),
            tokenizer: Tokenizer::new(),
        }
    }

    /// Replace the configuration after validating it
    pub fn with_config(mut self, config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Replace the sentence tokenizer
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Arc<L> {
        &self.lexicon
    }

    /// Summarize `text`
    pub fn summarize(&self, text: &str) -> Result<SummaryResult> {
        self.summarize_with_observer(text, &mut NoopObserver)
    }

    /// Summarize `text`, reporting every stage to `observer`
    pub fn summarize_with_observer(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<SummaryResult> {
        let config = &self.config;

        // Stage 1: Preprocess
        let doc = {
            trace_stage!(STAGE_PREPROCESS);
            observer.on_stage_start(STAGE_PREPROCESS);
            let clock = StageClock::start();
            let preprocessor = Preprocessor::from_lexicon(self.lexicon.as_ref())
                .with_tokenizer(self.tokenizer.clone());
            let doc = preprocessor.preprocess(text)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(doc.len())
                .build();
            observer.on_stage_end(STAGE_PREPROCESS, &report);
            observer.on_document(&doc);
            doc
        };

        if let Some(limit) = config.max_sentences {
            if doc.len() > limit {
                return Err(SummarizerError::DocumentTooLarge {
                    sentences: doc.len(),
                    limit,
                });
            }
        }

        let assembler = ResultAssembler::new();

        if doc.len() <= 1 {
            trace_stage!(STAGE_ASSEMBLE);
            observer.on_stage_start(STAGE_ASSEMBLE);
            let clock = StageClock::start();
            let result = assembler.passthrough(text, &doc);
            observer.on_stage_end(STAGE_ASSEMBLE, &StageReport::new(clock.elapsed()));

            #[cfg(feature = "tracing")]
            tracing::debug!(sentences = doc.len(), "document too short to rank");

            return Ok(result);
        }

        // Stage 2: Vectorize
        let space = {
            trace_stage!(STAGE_VECTORIZE);
            observer.on_stage_start(STAGE_VECTORIZE);
            let clock = StageClock::start();
            let space = VectorSpaceBuilder::new()
                .with_parallel_threshold(config.parallel_threshold)
                .build(doc.processed());
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(space.len())
                .build();
            observer.on_stage_end(STAGE_VECTORIZE, &report);
            space
        };

        // Stage 3: Build graph
        let (graph, threshold) = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let graph = SimilarityGraphBuilder::new()
                .with_strategy(config.threshold)
                .with_parallel_threshold(config.parallel_threshold)
                .build(&space);
            let threshold = graph.threshold;
            let csr = CsrGraph::from_graph(&graph);
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(csr.num_nodes)
                .edges(csr.num_edges())
                .build();
            observer.on_stage_end(STAGE_GRAPH, &report);
            observer.on_graph(&csr);
            (csr, threshold)
        };

        // Stage 4: Rank
        let propagation = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let propagation = RankPropagator::new()
                .with_damping(config.damping)
                .with_max_iterations(config.max_iterations)
                .with_threshold(config.convergence_threshold)
                .run(&graph);
            let report = StageReportBuilder::new(clock.elapsed())
                .iterations(propagation.iterations)
                .converged(propagation.converged)
                .residual(propagation.delta)
                .build();
            observer.on_stage_end(STAGE_RANK, &report);
            observer.on_rank(&propagation);
            propagation
        };

        // Stage 5: Score
        let scores = {
            trace_stage!(STAGE_SCORE);
            observer.on_stage_start(STAGE_SCORE);
            let clock = StageClock::start();
            let scores = HeuristicScorer::from_config(config).score(
                &propagation.scores,
                doc.processed(),
                doc.tags(),
            );
            observer.on_stage_end(STAGE_SCORE, &StageReport::new(clock.elapsed()));
            observer.on_scores(&scores);
            scores
        };

        // Stage 6: Select
        let selected = {
            trace_stage!(STAGE_SELECT);
            observer.on_stage_start(STAGE_SELECT);
            let clock = StageClock::start();
            let selector = SummarySelector::new().with_length(config.summary_length);
            let selected = selector.select(&scores, selector.target_length(doc.len()));
            observer.on_stage_end(STAGE_SELECT, &StageReport::new(clock.elapsed()));
            selected
        };

        // Stage 7: Assemble
        trace_stage!(STAGE_ASSEMBLE);
        observer.on_stage_start(STAGE_ASSEMBLE);
        let clock = StageClock::start();
        let result = assembler.assemble(
            text,
            &doc,
            &scores,
            &selected,
            &graph,
            RankDiagnostics {
                threshold: Some(threshold),
                iterations: propagation.iterations,
                converged: propagation.converged,
            },
        );
        observer.on_stage_end(STAGE_ASSEMBLE, &StageReport::new(clock.elapsed()));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sentences = result.original_sentence_count,
            selected = result.summarized_sentence_count,
            edges = result.graph_links.len(),
            threshold,
            reduction_rate = result.reduction_rate,
            "summarized document"
        );

        Ok(result)
    }
}
