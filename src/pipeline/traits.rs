//! Stage trait definitions for the merge pipeline.
//!
//! Every merge pass has the same shape: propose candidate spans over the
//! current token sequence, resolve overlaps with one of the two policies in
//! [`crate::phrase::overlap`], then contract the accepted spans. Passes are
//! statically dispatched inside [`super::runner::MergePipeline`].

use crate::phrase::overlap::OverlapPolicy;
use crate::phrase::retokenize::merge_spans;
use crate::types::{Document, Span};

// ============================================================================
// MergePass: one retokenization rule set
// ============================================================================

/// A deterministic `Document -> Document` transform by span contraction.
///
/// # Contract
///
/// - **Input**: a borrowed [`Document`] snapshot, never mutated.
/// - **Output**: a new document with the same source text. Tokens keep
///   their order; accepted spans collapse to one token each, so the output
///   has at most as many tokens as the input.
/// - Accepted spans never overlap within one pass.
pub trait MergePass: Send + Sync {
    /// Candidate spans, possibly overlapping
    fn candidates(&self, doc: &Document) -> Vec<Span>;

    /// How overlapping candidates are resolved
    fn policy(&self) -> OverlapPolicy;

    /// Run the pass
    fn merge(&self, doc: &Document) -> Document {
        let candidates = self.candidates(doc);
        if candidates.is_empty() {
            return doc.clone();
        }
        let accepted = self.policy().resolve(&candidates);
        merge_spans(doc, &accepted)
    }
}

/// Pass that proposes nothing; the document flows through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPass;

impl MergePass for NoopPass {
    #[inline]
    fn candidates(&self, _doc: &Document) -> Vec<Span> {
        Vec::new()
    }

    fn policy(&self) -> OverlapPolicy {
        OverlapPolicy::KeepLongest
    }
}
