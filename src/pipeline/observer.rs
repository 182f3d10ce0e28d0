//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.
//!
//! Every hook has an empty default body, so an observer only implements the
//! callbacks it cares about.

use crate::graph::csr::CsrGraph;
use crate::pagerank::PropagationResult;
use crate::types::Document;
use std::time::{Duration, Instant};

pub const STAGE_PREPROCESS: &str = "preprocess";
pub const STAGE_VECTORIZE: &str = "vectorize";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_SCORE: &str = "score";
pub const STAGE_SELECT: &str = "select";
pub const STAGE_ASSEMBLE: &str = "assemble";

/// All stages in execution order
pub const STAGES: [&str; 7] = [
    STAGE_PREPROCESS,
    STAGE_VECTORIZE,
    STAGE_GRAPH,
    STAGE_RANK,
    STAGE_SCORE,
    STAGE_SELECT,
    STAGE_ASSEMBLE,
];

// ============================================================================
// StageReport
// ============================================================================

/// Timing and optional metrics for one finished stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    duration: Duration,
    nodes: Option<usize>,
    edges: Option<usize>,
    iterations: Option<usize>,
    converged: Option<bool>,
    residual: Option<f64>,
}

impl StageReport {
    /// A report carrying only the elapsed time
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Node count (sentences) when the stage produced a graph or vectors
    pub fn nodes(&self) -> Option<usize> {
        self.nodes
    }

    /// Undirected edge count, graph stage only
    pub fn edges(&self) -> Option<usize> {
        self.edges
    }

    /// Propagation rounds, rank stage only
    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }

    pub fn converged(&self) -> Option<bool> {
        self.converged
    }

    /// Largest score change in the final round, rank stage only
    pub fn residual(&self) -> Option<f64> {
        self.residual
    }
}

/// Builder for [`StageReport`] values with metrics
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(duration: Duration) -> Self {
        Self {
            report: StageReport::new(duration),
        }
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.report.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn residual(mut self, residual: f64) -> Self {
        self.report.residual = Some(residual);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Wall-clock timer for a single stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

// ============================================================================
// PipelineObserver
// ============================================================================

/// Callbacks fired while a summarization runs
pub trait PipelineObserver {
    /// A stage is about to run
    fn on_stage_start(&mut self, _stage: &'static str) {}

    /// A stage finished
    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Preprocessing produced the document
    fn on_document(&mut self, _doc: &Document) {}

    /// The similarity graph was built
    fn on_graph(&mut self, _graph: &CsrGraph) {}

    /// Rank propagation finished
    fn on_rank(&mut self, _result: &PropagationResult) {}

    /// Heuristic scores were computed
    fn on_scores(&mut self, _scores: &[f64]) {}
}

/// Observer that ignores every callback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records the report of every finished stage
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports in stage order
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report of a named stage, if it ran
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    /// Sum of all stage durations
    pub fn total_duration(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.duration()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}
