//! Modifier-noun merging
//!
//! The marker word (`Relations` by default) always absorbs the token before
//! it, whatever the tags: `Foreign Relations`, `Sino-Soviet Relations`.

use crate::phrase::overlap::OverlapPolicy;
use crate::pipeline::traits::MergePass;
use crate::types::{Document, Span};
use crate::vocab::DEFAULT_MODIFIER_MARKER;

#[derive(Debug, Clone)]
pub struct ModifierMerge {
    marker: String,
}

impl Default for ModifierMerge {
    fn default() -> Self {
        Self::new(DEFAULT_MODIFIER_MARKER)
    }
}

impl ModifierMerge {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl MergePass for ModifierMerge {
    fn candidates(&self, doc: &Document) -> Vec<Span> {
        doc.tokens()
            .iter()
            .skip(1)
            .filter(|t| t.text == self.marker)
            .map(|t| Span::new(t.index - 1, t.index + 1))
            .collect()
    }

    fn policy(&self) -> OverlapPolicy {
        OverlapPolicy::KeepLongest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PosTag, Token};

    fn texts(doc: &Document) -> Vec<&str> {
        doc.tokens().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_marker_absorbs_predecessor() {
        let doc = Document::new(
            "Improving Foreign Relations",
            vec![
                Token::new("Improving", 0, PosTag::Verb, 0),
                Token::new("Foreign", 10, PosTag::Adj, 1),
                Token::new("Relations", 18, PosTag::Noun, 2),
            ],
        );
        let out = ModifierMerge::default().merge(&doc);
        assert_eq!(texts(&out), vec!["Improving", "Foreign Relations"]);
        assert_eq!(out.tokens()[1].pos, PosTag::Adj);
    }

    #[test]
    fn test_marker_first_is_left_alone() {
        let doc = Document::new(
            "Relations Today",
            vec![
                Token::new("Relations", 0, PosTag::Noun, 0),
                Token::new("Today", 10, PosTag::Noun, 1),
            ],
        );
        assert!(ModifierMerge::default().candidates(&doc).is_empty());
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        let doc = Document::new(
            "public relations",
            vec![
                Token::new("public", 0, PosTag::Adj, 0),
                Token::new("relations", 7, PosTag::Noun, 1),
            ],
        );
        assert!(ModifierMerge::default().candidates(&doc).is_empty());
    }

    #[test]
    fn test_consecutive_markers_resolve_longest_first() {
        let doc = Document::new(
            "Trade Relations Relations",
            vec![
                Token::new("Trade", 0, PosTag::Noun, 0),
                Token::new("Relations", 6, PosTag::Noun, 1),
                Token::new("Relations", 16, PosTag::Noun, 2),
            ],
        );
        let out = ModifierMerge::default().merge(&doc);
        assert_eq!(texts(&out), vec!["Trade Relations", "Relations"]);
    }

    #[test]
    fn test_custom_marker() {
        let doc = Document::new(
            "Arms Control",
            vec![
                Token::new("Arms", 0, PosTag::Noun, 0),
                Token::new("Control", 5, PosTag::Noun, 1),
            ],
        );
        let out = ModifierMerge::new("Control").merge(&doc);
        assert_eq!(texts(&out), vec!["Arms Control"]);
    }
}
