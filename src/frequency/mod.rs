//! Per-year frequency counting
//!
//! Counting runs in two passes over the merged documents of one year:
//!
//! 1. Every PERSON-labelled token is normalized and counted. Names seen
//!    more than `person_threshold` times form the frequent-person set.
//! 2. Every token is normalized and tallied unless a [`SkipReason`]
//!    applies.
//!
//! Pass 2 needs the whole year's person counts, so it only starts once
//! pass 1 has seen every document. With `parallel` set, each pass builds
//! one partial map per document on the rayon pool and the partials are
//! summed afterwards.

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::nlp::normalize::{is_upper_case, Normalizer};
use crate::types::{Document, Token, WordFreqConfig, YearCounts};
use crate::vocab::Vocabulary;

/// Why a token was left out of the tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Single-word PERSON token whose name is not frequent this year
    InfrequentPerson,
    /// Tag in the vocabulary's skip set
    SkippedPos,
    /// Canonical form on the block list
    BlockListed,
    Stopword,
    /// Fewer than `min_word_chars` characters and not upper-case
    TooShort,
}

/// Counts canonical words for one year at a time
#[derive(Debug, Clone)]
pub struct FrequencyAggregator<'a> {
    vocab: &'a Vocabulary,
    normalizer: Normalizer<'a>,
    person_threshold: u64,
    min_word_chars: usize,
    parallel: bool,
}

impl<'a> FrequencyAggregator<'a> {
    pub fn new(vocab: &'a Vocabulary, config: &WordFreqConfig) -> Self {
        Self {
            vocab,
            normalizer: Normalizer::new(vocab),
            person_threshold: config.person_threshold,
            min_word_chars: config.min_word_chars,
            parallel: config.parallel,
        }
    }

    /// Pass 1: canonical PERSON names and how often each occurs
    pub fn person_counts(&self, docs: &[Document]) -> YearCounts {
        self.tally(docs, |doc| {
            doc.tokens()
                .iter()
                .filter(|t| t.is_person())
                .filter_map(|t| self.normalizer.normalize(&t.text))
                .collect()
        })
    }

    /// Names counted strictly more than the threshold
    pub fn frequent_persons(&self, person_counts: &YearCounts) -> FxHashSet<String> {
        person_counts
            .iter()
            .filter(|(_, count)| **count > self.person_threshold)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Pass 2 decision for one token with canonical form `word`
    pub fn skip_reason(
        &self,
        token: &Token,
        word: &str,
        frequent: &FxHashSet<String>,
    ) -> Option<SkipReason> {
        if token.is_person() && !token.text.contains(' ') && !frequent.contains(word) {
            return Some(SkipReason::InfrequentPerson);
        }
        if self.vocab.skip_pos.contains(&token.pos) {
            return Some(SkipReason::SkippedPos);
        }
        if self.vocab.block_list.contains(word) {
            return Some(SkipReason::BlockListed);
        }
        if self.vocab.stopwords.is_stopword(&word.to_lowercase()) {
            return Some(SkipReason::Stopword);
        }
        if word.chars().count() < self.min_word_chars && !is_upper_case(word) {
            return Some(SkipReason::TooShort);
        }
        None
    }

    /// Word counts for one year's merged documents
    pub fn aggregate_year(&self, docs: &[Document]) -> YearCounts {
        let person_counts = self.person_counts(docs);
        let frequent = self.frequent_persons(&person_counts);
        debug!(
            persons = person_counts.len(),
            frequent = frequent.len(),
            "person names counted"
        );

        self.tally(docs, |doc| {
            doc.tokens()
                .iter()
                .filter_map(|token| {
                    let word = self.normalizer.normalize(&token.text)?;
                    self.skip_reason(token, &word, &frequent)
                        .is_none()
                        .then_some(word)
                })
                .collect()
        })
    }

    /// Count the words `extract` yields from each document.
    fn tally<F>(&self, docs: &[Document], extract: F) -> YearCounts
    where
        F: Fn(&Document) -> Vec<String> + Sync,
    {
        let count_doc = |doc: &Document| {
            let mut partial = YearCounts::default();
            for word in extract(doc) {
                *partial.entry(word).or_insert(0) += 1;
            }
            partial
        };

        if !self.parallel {
            let mut counts = YearCounts::default();
            for doc in docs {
                merge_counts(&mut counts, count_doc(doc));
            }
            return counts;
        }

        let partials: Vec<YearCounts> = docs.par_iter().map(count_doc).collect();
        let mut counts = YearCounts::default();
        for partial in partials {
            merge_counts(&mut counts, partial);
        }
        counts
    }
}

/// Add every count in `partial` into `into`.
pub fn merge_counts(into: &mut FxHashMap<String, u64>, partial: FxHashMap<String, u64>) {
    for (word, count) in partial {
        *into.entry(word).or_insert(0) += count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::stopwords::StopwordFilter;
    use crate::types::{EntityLabel, PosTag};

    fn vocab() -> Vocabulary {
        Vocabulary::empty()
            .with_stopwords(StopwordFilter::from_list(&["and", "the", "of"]))
            .with_known_acronyms(&["nato"])
            .with_typo_corrections(&[("expanson", "expansion")])
            .with_block_list(&["reagan"])
    }

    fn noun(text: &str) -> Token {
        Token::new(text, 0, PosTag::Noun, 0)
    }

    fn person(text: &str) -> Token {
        Token::new(text, 0, PosTag::Propn, 0).with_entity(EntityLabel::Person, true)
    }

    fn doc(tokens: Vec<Token>) -> Document {
        Document::new("", tokens)
    }

    fn gorbachev_docs(n: usize) -> Vec<Document> {
        (0..n)
            .map(|_| doc(vec![person("Gorbachev"), noun("reforms")]))
            .collect()
    }

    #[test]
    fn test_person_seen_three_times_is_dropped() {
        let vocab = vocab();
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        let counts = agg.aggregate_year(&gorbachev_docs(3));
        assert_eq!(counts.get("gorbachev"), None);
        assert_eq!(counts.get("reforms"), Some(&3));
    }

    #[test]
    fn test_fourth_occurrence_counts_all_four() {
        let vocab = vocab();
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        let counts = agg.aggregate_year(&gorbachev_docs(4));
        assert_eq!(counts.get("gorbachev"), Some(&4));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let vocab = vocab();
        let config = WordFreqConfig::default().with_person_threshold(0);
        let agg = FrequencyAggregator::new(&vocab, &config);
        let counts = agg.aggregate_year(&gorbachev_docs(1));
        assert_eq!(counts.get("gorbachev"), Some(&1));
    }

    #[test]
    fn test_multi_word_person_always_kept() {
        let vocab = vocab();
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        let counts = agg.aggregate_year(&[doc(vec![person("Helmut Kohl")])]);
        assert_eq!(counts.get("helmut kohl"), Some(&1));
    }

    #[test]
    fn test_person_counts_use_typo_corrections() {
        let vocab = vocab().with_typo_corrections(&[("gorbachov", "gorbachev")]);
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        let docs = vec![
            doc(vec![person("Gorbachov")]),
            doc(vec![person("Gorbachev")]),
        ];
        let counts = agg.person_counts(&docs);
        assert_eq!(counts.get("gorbachev"), Some(&2));
    }

    #[test]
    fn test_skip_reasons() {
        let vocab = vocab();
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        let none = FxHashSet::default();

        assert_eq!(
            agg.skip_reason(&person("Kohl"), "kohl", &none),
            Some(SkipReason::InfrequentPerson)
        );
        assert_eq!(
            agg.skip_reason(&Token::new("1989", 0, PosTag::Num, 0), "1989", &none),
            Some(SkipReason::SkippedPos)
        );
        assert_eq!(
            agg.skip_reason(&noun("Reagan"), "reagan", &none),
            Some(SkipReason::BlockListed)
        );
        assert_eq!(
            agg.skip_reason(&noun("The"), "the", &none),
            Some(SkipReason::Stopword)
        );
        assert_eq!(
            agg.skip_reason(&noun("eu"), "eu", &none),
            Some(SkipReason::TooShort)
        );
        assert_eq!(agg.skip_reason(&noun("UN"), "UN", &none), None);
        assert_eq!(agg.skip_reason(&noun("war"), "war", &none), None);
    }

    #[test]
    fn test_every_default_skip_tag() {
        let vocab = vocab();
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        let none = FxHashSet::default();

        let cases = [
            (PosTag::Adp, Some(SkipReason::SkippedPos)),
            (PosTag::Det, Some(SkipReason::SkippedPos)),
            (PosTag::Punct, Some(SkipReason::SkippedPos)),
            (PosTag::Cconj, Some(SkipReason::SkippedPos)),
            (PosTag::Part, Some(SkipReason::SkippedPos)),
            (PosTag::Sconj, Some(SkipReason::SkippedPos)),
            (PosTag::Sym, Some(SkipReason::SkippedPos)),
            (PosTag::Space, Some(SkipReason::SkippedPos)),
            (PosTag::Num, Some(SkipReason::SkippedPos)),
            (PosTag::Noun, None),
            (PosTag::Propn, None),
            (PosTag::Adj, None),
            (PosTag::Verb, None),
        ];
        for (pos, expected) in cases {
            let token = Token::new("Policy", 0, pos, 0);
            assert_eq!(agg.skip_reason(&token, "policy", &none), expected, "{pos:?}");
        }
        assert_eq!(
            cases.iter().filter(|(_, r)| r.is_some()).count(),
            crate::vocab::DEFAULT_SKIP_POS.len()
        );
    }

    #[test]
    fn test_quote_mark_never_counted() {
        let vocab = vocab();
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        let counts = agg.aggregate_year(&[doc(vec![
            Token::new("'", 0, PosTag::Punct, 0),
            noun("realism"),
            Token::new("'", 0, PosTag::Punct, 2),
        ])]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("realism"), Some(&1));
    }

    #[test]
    fn test_frequent_person_passes_other_rules() {
        let vocab = vocab();
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        let frequent: FxHashSet<String> = ["kohl".to_string()].into_iter().collect();
        assert_eq!(agg.skip_reason(&person("Kohl"), "kohl", &frequent), None);
    }

    #[test]
    fn test_stopword_check_is_lower_cased() {
        let vocab = vocab().with_stopwords(StopwordFilter::from_list(&["and"]));
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        assert_eq!(
            agg.skip_reason(&noun("AND"), "AND", &FxHashSet::default()),
            Some(SkipReason::Stopword)
        );
    }

    #[test]
    fn test_acronyms_and_typos_canonicalized() {
        let vocab = vocab();
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        let counts = agg.aggregate_year(&[
            doc(vec![noun("Nato"), noun("Expanson")]),
            doc(vec![noun("NATO"), noun("expansion")]),
        ]);
        assert_eq!(counts.get("NATO"), Some(&2));
        assert_eq!(counts.get("expansion"), Some(&2));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let vocab = vocab();
        let mut docs = gorbachev_docs(5);
        docs.push(doc(vec![noun("Détente"), noun("and"), noun("NATO")]));
        docs.push(doc(vec![person("Kohl"), noun("Unification")]));

        let seq = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        let par = FrequencyAggregator::new(&vocab, &WordFreqConfig::default().with_parallel(true));
        assert_eq!(seq.aggregate_year(&docs), par.aggregate_year(&docs));
        assert_eq!(par.aggregate_year(&docs).get("détente"), Some(&1));
    }

    #[test]
    fn test_empty_year() {
        let vocab = vocab();
        let agg = FrequencyAggregator::new(&vocab, &WordFreqConfig::default());
        assert!(agg.aggregate_year(&[]).is_empty());
    }

    #[test]
    fn test_merge_counts_sums() {
        let mut a: YearCounts = [("war".to_string(), 2)].into_iter().collect();
        let b: YearCounts = [("war".to_string(), 1), ("peace".to_string(), 4)]
            .into_iter()
            .collect();
        merge_counts(&mut a, b);
        assert_eq!(a.get("war"), Some(&3));
        assert_eq!(a.get("peace"), Some(&4));
    }
}
