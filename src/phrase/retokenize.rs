//! Span contraction
//!
//! Replaces each accepted span of a document with a single token. The merged
//! text is read back from the source title between the first member's start
//! and the last member's end, so inner whitespace and dashes are exactly what
//! the title contained.

use crate::types::{Document, Span, Token};

use super::overlap::is_disjoint;

/// Contract `spans` (ordered, non-overlapping) into single tokens.
///
/// Out-of-range spans are clamped to the document. Tokens outside any span
/// are carried over unchanged, so the output never has more tokens than the
/// input and keeps their order.
pub fn merge_spans(doc: &Document, spans: &[Span]) -> Document {
    debug_assert!(is_disjoint(spans), "merge spans must not overlap");

    let tokens = doc.tokens();
    let mut out = Vec::with_capacity(tokens.len());
    let mut cursor = 0;

    for span in spans {
        let end = span.end.min(tokens.len());
        if span.start < cursor || span.start >= end {
            continue;
        }
        out.extend_from_slice(&tokens[cursor..span.start]);
        out.push(merge_run(doc, &tokens[span.start..end]));
        cursor = end;
    }
    out.extend_from_slice(&tokens[cursor..]);

    doc.with_tokens(out)
}

/// Collapse a run of adjacent tokens into one.
///
/// Tag comes from the first member. The entity label survives only when all
/// members carry the same one.
fn merge_run(doc: &Document, run: &[Token]) -> Token {
    let first = &run[0];
    if run.len() == 1 {
        return first.clone();
    }
    let last = &run[run.len() - 1];

    let text = match doc.slice_chars(first.start, last.end()) {
        Some(slice) => slice.to_string(),
        // Offsets disagree with the source; fall back to the token texts
        None => run.iter().map(|t| t.text.as_str()).collect(),
    };

    let shared_entity = first
        .entity
        .filter(|label| run.iter().all(|t| t.entity == Some(*label)));

    Token {
        len: text.chars().count(),
        text,
        start: first.start,
        pos: first.pos,
        entity: shared_entity,
        entity_begin: shared_entity.is_some() && first.entity_begin,
        index: first.index,
    }
}
