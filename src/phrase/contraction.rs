//! Contraction merging
//!
//! Re-attaches clitics split off by the annotator: `Obama` + `'s`,
//! `ca` + `n't`, `they` + `'re`. Candidates are resolved earliest-first.

use crate::phrase::overlap::OverlapPolicy;
use crate::pipeline::traits::MergePass;
use crate::types::{Document, PosTag, Span, Token};

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// Merges clitics with the token before them
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractionMerge;

impl ContractionMerge {
    fn is_clitic(token: &Token) -> bool {
        let tagged_clitic = matches!(token.pos, PosTag::Aux | PosTag::Part)
            && token.text.starts_with(APOSTROPHES);
        tagged_clitic || is_negation(&token.text)
    }
}

/// `n't` with either apostrophe
fn is_negation(text: &str) -> bool {
    text == "n't" || text == "n\u{2019}t"
}

impl MergePass for ContractionMerge {
    fn candidates(&self, doc: &Document) -> Vec<Span> {
        doc.tokens()
            .iter()
            .skip(1)
            .filter(|t| Self::is_clitic(t))
            .map(|t| Span::new(t.index - 1, t.index + 1))
            .collect()
    }

    fn policy(&self) -> OverlapPolicy {
        OverlapPolicy::GreedyEarliest
    }
}
