//! Named-entity and custom-term merging
//!
//! Runs first, straight after annotation. Candidates come from two places:
//! multi-token entity mentions reported by the annotator, and windows that
//! match a curated phrase from the [`CustomTermSet`]. Both are resolved
//! together, longest first, so a curated `South China Sea` beats an entity
//! mention covering only `China Sea`.

use std::sync::Arc;

use crate::phrase::overlap::OverlapPolicy;
use crate::pipeline::traits::MergePass;
use crate::types::{Document, Span};
use crate::vocab::CustomTermSet;

/// Merges entity mentions and curated multi-word terms
#[derive(Debug, Clone, Default)]
pub struct EntityMerge {
    terms: Arc<CustomTermSet>,
}

impl EntityMerge {
    pub fn new(terms: CustomTermSet) -> Self {
        Self {
            terms: Arc::new(terms),
        }
    }

    pub fn terms(&self) -> &CustomTermSet {
        &self.terms
    }
}

/// Multi-token entity mentions: a begin token plus every following token
/// with the same label and no begin flag.
pub fn entity_mentions(doc: &Document) -> Vec<Span> {
    let tokens = doc.tokens();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let Some(label) = tokens[i].entity else {
            i += 1;
            continue;
        };
        let mut end = i + 1;
        while end < tokens.len() && tokens[end].entity == Some(label) && !tokens[end].entity_begin {
            end += 1;
        }
        if end - i > 1 {
            spans.push(Span::new(i, end));
        }
        i = end;
    }
    spans
}

impl MergePass for EntityMerge {
    fn candidates(&self, doc: &Document) -> Vec<Span> {
        let mut spans = entity_mentions(doc);
        spans.extend(self.terms.find_matches(doc));
        spans
    }

    fn policy(&self) -> OverlapPolicy {
        OverlapPolicy::KeepLongest
    }
}
