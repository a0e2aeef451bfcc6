//! Pipeline observer: stage-boundary hooks for timing and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic: timing each merge pass, capturing intermediate documents,
//! or counting how many tokens each pass contracted.

use std::time::{Duration, Instant};

use crate::types::Document;

// ---------------------------------------------------------------------------
// Stage names
// ---------------------------------------------------------------------------

pub const STAGE_ENTITIES: &str = "merge_entities";
pub const STAGE_HYPHENS: &str = "merge_hyphens";
pub const STAGE_CONTRACTIONS: &str = "merge_contractions";
pub const STAGE_MODIFIERS: &str = "merge_modifiers";

/// Stage names in execution order
pub const STAGES: [&str; 4] = [STAGE_ENTITIES, STAGE_HYPHENS, STAGE_CONTRACTIONS, STAGE_MODIFIERS];

// ---------------------------------------------------------------------------
// StageClock / StageReport
// ---------------------------------------------------------------------------

/// Wall-clock timer for one stage
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

/// What a stage did: how long it took and how many tokens it saw/produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    duration: Duration,
    tokens_in: Option<usize>,
    tokens_out: Option<usize>,
}

impl StageReport {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tokens_in: None,
            tokens_out: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn tokens_in(&self) -> Option<usize> {
        self.tokens_in
    }

    pub fn tokens_out(&self) -> Option<usize> {
        self.tokens_out
    }

    /// Tokens absorbed by merges, when both counts are known
    pub fn merged(&self) -> Option<usize> {
        Some(self.tokens_in?.saturating_sub(self.tokens_out?))
    }
}

/// Fluent construction of a [`StageReport`]
#[derive(Debug, Clone, Copy)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(duration: Duration) -> Self {
        Self {
            report: StageReport::new(duration),
        }
    }

    pub fn tokens_in(mut self, n: usize) -> Self {
        self.report.tokens_in = Some(n);
        self
    }

    pub fn tokens_out(mut self, n: usize) -> Self {
        self.report.tokens_out = Some(n);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

// ---------------------------------------------------------------------------
// PipelineObserver
// ---------------------------------------------------------------------------

/// Callbacks fired by [`super::runner::MergePipeline::run`].
///
/// All methods default to no-ops, so implementors only override what they
/// need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// The document produced by the last stage
    fn on_document(&mut self, _doc: &Document) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

#[derive(Debug, Clone, Copy, Default)]
struct StageTotals {
    runs: usize,
    duration: Duration,
    merged: usize,
}

/// Running per-stage totals across every document observed
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    totals: [StageTotals; STAGES.len()],
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage completions recorded, over all stages
    pub fn stage_runs(&self) -> usize {
        self.totals.iter().map(|t| t.runs).sum()
    }

    /// Summed duration per stage
    pub fn total_by_stage(&self) -> Vec<(&'static str, Duration)> {
        STAGES
            .iter()
            .zip(&self.totals)
            .map(|(&stage, t)| (stage, t.duration))
            .collect()
    }

    /// Tokens absorbed per stage
    pub fn merged_by_stage(&self) -> Vec<(&'static str, usize)> {
        STAGES
            .iter()
            .zip(&self.totals)
            .map(|(&stage, t)| (stage, t.merged))
            .collect()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        let Some(i) = STAGES.iter().position(|&s| s == stage) else {
            return;
        };
        let totals = &mut self.totals[i];
        totals.runs += 1;
        totals.duration += report.duration();
        totals.merged += report.merged().unwrap_or(0);
    }
}
