//! Pipeline runner: runs the merge passes in order.
//!
//! The [`MergePipeline`] struct holds a statically-composed set of merge
//! passes. Calling [`MergePipeline::run`] executes them in their fixed order,
//! threading each document snapshot into the next pass and notifying a
//! [`PipelineObserver`] at each boundary:
//!
//! 1. Entity and custom-term merge
//! 2. Hyphen merge
//! 3. Contraction merge
//! 4. Modifier-noun merge
//!
//! # Static dispatch
//!
//! `MergePipeline` is generic over all pass types, so the compiler
//! monomorphizes each combination. Swap a pass for [`NoopPass`] to disable it.
//!
//! # Factory methods
//!
//! Use [`MergePipeline::standard`] to build the default pipeline from a
//! [`Vocabulary`] without spelling out the generics.

use tracing::debug;

use crate::phrase::{ContractionMerge, EntityMerge, HyphenMerge, ModifierMerge};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReportBuilder, STAGE_CONTRACTIONS,
    STAGE_ENTITIES, STAGE_HYPHENS, STAGE_MODIFIERS,
};
use crate::pipeline::traits::{MergePass, NoopPass};
use crate::types::Document;
use crate::vocab::Vocabulary;

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// MergePipeline: statically-composed pass container
// ============================================================================

/// The four merge passes, run in order.
///
/// | Param | Default impl |
/// |-------|--------------|
/// | `E` | [`EntityMerge`] |
/// | `H` | [`HyphenMerge`] |
/// | `C` | [`ContractionMerge`] |
/// | `M` | [`ModifierMerge`] |
#[derive(Debug, Clone)]
pub struct MergePipeline<E, H, C, M> {
    pub entities: E,
    pub hyphens: H,
    pub contractions: C,
    pub modifiers: M,
}

/// Type alias for the standard pipeline.
pub type StandardPipeline = MergePipeline<EntityMerge, HyphenMerge, ContractionMerge, ModifierMerge>;

impl StandardPipeline {
    /// Build the standard pipeline with custom terms and marker word taken
    /// from `vocab`.
    pub fn standard(vocab: &Vocabulary) -> Self {
        MergePipeline {
            entities: EntityMerge::new(vocab.custom_terms.clone()),
            hyphens: HyphenMerge,
            contractions: ContractionMerge,
            modifiers: ModifierMerge::new(vocab.modifier_marker.clone()),
        }
    }
}

impl Default for StandardPipeline {
    fn default() -> Self {
        Self::standard(&Vocabulary::default())
    }
}

// ============================================================================
// MergePipeline::run: execute passes in order
// ============================================================================

impl<E, H, C, M> MergePipeline<E, H, C, M>
where
    E: MergePass,
    H: MergePass,
    C: MergePass,
    M: MergePass,
{
    /// Run every pass, producing the fully merged document.
    ///
    /// The `observer` receives callbacks at each stage boundary. Pass
    /// [`NoopObserver`] for zero-overhead execution.
    pub fn run(&self, doc: Document, observer: &mut impl PipelineObserver) -> Document {
        let doc = run_stage(STAGE_ENTITIES, &self.entities, doc, observer);
        let doc = run_stage(STAGE_HYPHENS, &self.hyphens, doc, observer);
        let doc = run_stage(STAGE_CONTRACTIONS, &self.contractions, doc, observer);
        let doc = run_stage(STAGE_MODIFIERS, &self.modifiers, doc, observer);
        observer.on_document(&doc);
        doc
    }

    /// [`Self::run`] without an observer
    pub fn apply(&self, doc: Document) -> Document {
        self.run(doc, &mut NoopObserver)
    }
}

fn run_stage(
    stage: &'static str,
    pass: &impl MergePass,
    doc: Document,
    observer: &mut impl PipelineObserver,
) -> Document {
    trace_stage!(stage);
    observer.on_stage_start(stage);
    let clock = StageClock::start();
    let merged = pass.merge(&doc);
    let report = StageReportBuilder::new(clock.elapsed())
        .tokens_in(doc.len())
        .tokens_out(merged.len())
        .build();
    observer.on_stage_end(stage, &report);

    if merged.len() < doc.len() {
        debug!(stage, before = doc.len(), after = merged.len(), "merged tokens");
    }
    merged
}

// ============================================================================
// PipelineBuilder: fluent construction with custom passes
// ============================================================================

/// Fluent builder for a [`MergePipeline`] with custom passes.
///
/// Starts from the standard passes with the built-in vocabulary.
///
/// ```
/// # use rapid_wordfreq::pipeline::runner::PipelineBuilder;
/// # use rapid_wordfreq::pipeline::traits::NoopPass;
/// let pipeline = PipelineBuilder::new().modifiers(NoopPass).build();
/// ```
pub struct PipelineBuilder<
    E = EntityMerge,
    H = HyphenMerge,
    C = ContractionMerge,
    M = ModifierMerge,
> {
    entities: E,
    hyphens: H,
    contractions: C,
    modifiers: M,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::from_vocabulary(&Vocabulary::default())
    }

    pub fn from_vocabulary(vocab: &Vocabulary) -> Self {
        let MergePipeline {
            entities,
            hyphens,
            contractions,
            modifiers,
        } = StandardPipeline::standard(vocab);
        Self {
            entities,
            hyphens,
            contractions,
            modifiers,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, H, C, M> PipelineBuilder<E, H, C, M> {
    pub fn entities<P: MergePass>(self, pass: P) -> PipelineBuilder<P, H, C, M> {
        PipelineBuilder {
            entities: pass,
            hyphens: self.hyphens,
            contractions: self.contractions,
            modifiers: self.modifiers,
        }
    }

    pub fn hyphens<P: MergePass>(self, pass: P) -> PipelineBuilder<E, P, C, M> {
        PipelineBuilder {
            entities: self.entities,
            hyphens: pass,
            contractions: self.contractions,
            modifiers: self.modifiers,
        }
    }

    pub fn contractions<P: MergePass>(self, pass: P) -> PipelineBuilder<E, H, P, M> {
        PipelineBuilder {
            entities: self.entities,
            hyphens: self.hyphens,
            contractions: pass,
            modifiers: self.modifiers,
        }
    }

    pub fn modifiers<P: MergePass>(self, pass: P) -> PipelineBuilder<E, H, C, P> {
        PipelineBuilder {
            entities: self.entities,
            hyphens: self.hyphens,
            contractions: self.contractions,
            modifiers: pass,
        }
    }

    pub fn build(self) -> MergePipeline<E, H, C, M> {
        MergePipeline {
            entities: self.entities,
            hyphens: self.hyphens,
            contractions: self.contractions,
            modifiers: self.modifiers,
        }
    }
}

/// Pipeline with every pass disabled
pub type IdentityPipeline = MergePipeline<NoopPass, NoopPass, NoopPass, NoopPass>;

impl IdentityPipeline {
    pub fn identity() -> Self {
        MergePipeline {
            entities: NoopPass,
            hyphens: NoopPass,
            contractions: NoopPass,
            modifiers: NoopPass,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
