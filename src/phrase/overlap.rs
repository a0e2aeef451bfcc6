//! Overlap resolution for merge candidates
//!
//! Merge passes propose token spans that may overlap. Two policies reduce a
//! candidate list to a non-overlapping subset:
//!
//! - [`greedy_earliest`]: earliest start wins, longest first among equal starts.
//!   Used by the contraction pass.
//! - [`keep_longest`]: longest span wins wherever it starts (ties go to the
//!   earlier start). Used by the entity, hyphen, and modifier passes.
//!
//! Both return spans ordered by start and drop empty spans.

use serde::{Deserialize, Serialize};

use crate::types::Span;

/// Which resolution policy a merge pass applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    GreedyEarliest,
    KeepLongest,
}

impl OverlapPolicy {
    pub fn resolve(&self, candidates: &[Span]) -> Vec<Span> {
        match self {
            OverlapPolicy::GreedyEarliest => greedy_earliest(candidates),
            OverlapPolicy::KeepLongest => keep_longest(candidates),
        }
    }
}

/// Accept spans in (start asc, length desc) order, skipping any that start
/// before the end of the last accepted span.
pub fn greedy_earliest(candidates: &[Span]) -> Vec<Span> {
    let mut sorted: Vec<Span> = candidates.iter().copied().filter(|s| !s.is_empty()).collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut accepted: Vec<Span> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match accepted.last() {
            Some(last) if span.start < last.end => {}
            _ => accepted.push(span),
        }
    }
    accepted
}

/// Accept spans in (length desc, start asc) order, skipping any that overlap
/// an accepted span. The result is re-sorted by start.
pub fn keep_longest(candidates: &[Span]) -> Vec<Span> {
    let mut sorted: Vec<Span> = candidates.iter().copied().filter(|s| !s.is_empty()).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.start.cmp(&b.start)));

    let mut accepted: Vec<Span> = Vec::with_capacity(sorted.len());
    for span in sorted {
        if accepted.iter().all(|kept| !kept.overlaps(&span)) {
            accepted.push(span);
        }
    }
    accepted.sort_unstable();
    accepted
}

/// True if no two spans in an ordered list overlap
pub fn is_disjoint(spans: &[Span]) -> bool {
    spans.windows(2).all(|w| w[0].end <= w[1].start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(pairs: &[(usize, usize)]) -> Vec<Span> {
        pairs.iter().map(|&(s, e)| Span::new(s, e)).collect()
    }

    #[test]
    fn test_greedy_earliest_prefers_earlier_start() {
        // [1,3) starts first, so [2,6) is rejected despite being longer
        let out = greedy_earliest(&spans(&[(2, 6), (1, 3)]));
        assert_eq!(out, spans(&[(1, 3)]));
    }

    #[test]
    fn test_greedy_earliest_longest_on_tie() {
        let out = greedy_earliest(&spans(&[(0, 2), (0, 3), (3, 4)]));
        assert_eq!(out, spans(&[(0, 3), (3, 4)]));
    }

    #[test]
    fn test_greedy_earliest_adjacent_spans_both_kept() {
        let out = greedy_earliest(&spans(&[(2, 4), (0, 2)]));
        assert_eq!(out, spans(&[(0, 2), (2, 4)]));
    }

    #[test]
    fn test_greedy_earliest_discards_start_before_previous_end() {
        let input = spans(&[(0, 2), (1, 3), (2, 4), (3, 5), (7, 9), (8, 9)]);
        let out = greedy_earliest(&input);
        assert!(is_disjoint(&out));

        // Replay the sort order and check every discarded span started before
        // the end of the span accepted just before it.
        let mut sorted = input.clone();
        sorted.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        let mut last_end = 0;
        for span in sorted {
            if out.contains(&span) {
                last_end = span.end;
            } else {
                assert!(span.start < last_end, "{span:?} was dropped without conflict");
            }
        }
    }

    #[test]
    fn test_keep_longest_favours_length_over_position() {
        // The later, longer span beats the earlier, shorter one
        let out = keep_longest(&spans(&[(1, 3), (2, 6)]));
        assert_eq!(out, spans(&[(2, 6)]));
    }

    #[test]
    fn test_keep_longest_reorders_by_start() {
        let out = keep_longest(&spans(&[(5, 6), (0, 3), (3, 5)]));
        assert_eq!(out, spans(&[(0, 3), (3, 5), (5, 6)]));
    }

    #[test]
    fn test_keep_longest_equal_length_earlier_wins() {
        let out = keep_longest(&spans(&[(1, 3), (0, 2)]));
        assert_eq!(out, spans(&[(0, 2)]));
    }

    #[test]
    fn test_keep_longest_longer_rival_always_survives() {
        let input = spans(&[(0, 2), (1, 4), (3, 5), (4, 9), (8, 10), (9, 10)]);
        let out = keep_longest(&input);
        assert!(is_disjoint(&out));

        for a in &input {
            for b in &input {
                if a.overlaps(b) && a.len() > b.len() && out.contains(b) {
                    // b may only survive if a lost to something even longer
                    assert!(!out.contains(a));
                    assert!(out.iter().any(|k| k.overlaps(a) && k.len() >= a.len()));
                }
            }
        }
        assert!(out.contains(&Span::new(4, 9)));
    }

    #[test]
    fn test_duplicates_and_empty_spans() {
        let input = spans(&[(0, 2), (0, 2), (3, 3)]);
        assert_eq!(greedy_earliest(&input), spans(&[(0, 2)]));
        assert_eq!(keep_longest(&input), spans(&[(0, 2)]));
    }

    #[test]
    fn test_empty_input() {
        assert!(greedy_earliest(&[]).is_empty());
        assert!(keep_longest(&[]).is_empty());
    }
}
