//! Hyphenated compound merging
//!
//! Joins dash-linked token runs such as `twenty` `-` `first` `-` `century`
//! into a single token when every dash touches both neighbours. Whitespace
//! is judged from character offsets only: `a.start + a.len == b.start`.

use crate::phrase::overlap::OverlapPolicy;
use crate::pipeline::traits::MergePass;
use crate::types::{Document, Span, Token};

/// Hyphen, en dash, em dash
pub const DASHES: [&str; 3] = ["-", "\u{2013}", "\u{2014}"];

/// Merges `word-word(-word)*` runs with no whitespace around the dashes
#[derive(Debug, Clone, Copy, Default)]
pub struct HyphenMerge;

fn is_dash(token: &Token) -> bool {
    DASHES.contains(&token.text.as_str())
}

impl MergePass for HyphenMerge {
    fn candidates(&self, doc: &Document) -> Vec<Span> {
        let tokens = doc.tokens();
        let n = tokens.len();
        let mut spans = Vec::new();
        let mut i = 1;

        while i + 1 < n {
            let dash = &tokens[i];
            if !(is_dash(dash) && tokens[i - 1].touches(dash) && dash.touches(&tokens[i + 1])) {
                i += 1;
                continue;
            }

            // [start, end] inclusive; extend across further dash/word pairs
            let start = i - 1;
            let mut end = i + 1;
            while end + 2 < n
                && is_dash(&tokens[end + 1])
                && tokens[end].touches(&tokens[end + 1])
                && tokens[end + 1].touches(&tokens[end + 2])
            {
                end += 2;
            }

            spans.push(Span::new(start, end + 1));
            i = end + 1;
        }
        spans
    }

    fn policy(&self) -> OverlapPolicy {
        OverlapPolicy::KeepLongest
    }
}
