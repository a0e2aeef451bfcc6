//! Per-year word frequencies over article titles.
//!
//! Each title is annotated (tokens, UD tags, entity labels), then run
//! through four retokenization passes that decide what counts as one word:
//!
//! 1. named entities and curated multi-word terms (`Cold War`)
//! 2. hyphenated compounds (`twenty-first-century`)
//! 3. contractions (`can't`, `Obama's`)
//! 4. the modifier marker (`Foreign Relations`)
//!
//! Merged tokens are normalized (acronyms, case, typo fixes) and counted per
//! year, with infrequent person names, function words and short tokens
//! filtered out.
//!
//! # Quick start
//!
//! ```
//! use rapid_wordfreq::{RuleAnnotator, WordFreq};
//!
//! let wf = WordFreq::new(RuleAnnotator::new());
//! let titles = vec![
//!     "NATO and the Cold War".to_string(),
//!     "NATO Expansion".to_string(),
//! ];
//! let counts = wf.process_year(&titles).unwrap();
//! assert_eq!(counts["NATO"], 2);
//! assert_eq!(counts["cold war"], 1);
//! ```

pub mod annotate;
pub mod corpus;
pub mod errors;
pub mod export;
pub mod frequency;
pub mod nlp;
pub mod phrase;
pub mod pipeline;
pub mod types;
pub mod vocab;

pub use annotate::{Annotator, JsonAnnotator};
pub use corpus::{parse_issue_listing, Corpus, CorpusParser};
pub use errors::{Result, WordFreqError};
pub use frequency::{FrequencyAggregator, SkipReason};
pub use nlp::normalize::Normalizer;
pub use nlp::stopwords::StopwordFilter;
pub use nlp::tokenizer::RuleAnnotator;
pub use pipeline::{MergePipeline, PipelineBuilder, StandardPipeline, VocabularySpec};
pub use types::{
    Document, FailurePolicy, PosTag, Span, Token, WordFreqByYear, WordFreqConfig, YearCounts,
};
pub use vocab::{CustomTermSet, Vocabulary};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::phrase::{ContractionMerge, EntityMerge, HyphenMerge, ModifierMerge};
use crate::pipeline::observer::{NoopObserver, PipelineObserver};
use crate::pipeline::traits::MergePass;

/// Annotator, merge passes, vocabulary and config bundled for batch runs
pub struct WordFreq<
    A,
    E = EntityMerge,
    H = HyphenMerge,
    C = ContractionMerge,
    M = ModifierMerge,
> {
    annotator: A,
    pipeline: MergePipeline<E, H, C, M>,
    vocab: Vocabulary,
    config: WordFreqConfig,
}

impl<A: Annotator> WordFreq<A> {
    /// Built-in vocabulary and default config
    pub fn new(annotator: A) -> Self {
        Self::with_vocabulary(annotator, Vocabulary::default())
    }

    /// Standard passes configured from `vocab`
    pub fn with_vocabulary(annotator: A, vocab: Vocabulary) -> Self {
        Self {
            annotator,
            pipeline: StandardPipeline::standard(&vocab),
            vocab,
            config: WordFreqConfig::default(),
        }
    }
}

impl<A, E, H, C, M> WordFreq<A, E, H, C, M>
where
    A: Annotator,
    E: MergePass,
    H: MergePass,
    C: MergePass,
    M: MergePass,
{
    pub fn with_config(mut self, config: WordFreqConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap in a custom pipeline (see [`PipelineBuilder`])
    pub fn with_pipeline<E2, H2, C2, M2>(
        self,
        pipeline: MergePipeline<E2, H2, C2, M2>,
    ) -> WordFreq<A, E2, H2, C2, M2> {
        WordFreq {
            annotator: self.annotator,
            pipeline,
            vocab: self.vocab,
            config: self.config,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn config(&self) -> &WordFreqConfig {
        &self.config
    }

    /// Annotate one title and run every merge pass over it
    pub fn merge_title(&self, title: &str, observer: &mut impl PipelineObserver) -> Result<Document> {
        let doc = self.annotator.annotate(title)?;
        Ok(self.pipeline.run(doc, observer))
    }

    /// Merged documents for a year, applying the failure policy
    pub fn documents(&self, titles: &[String]) -> Result<Vec<Document>> {
        let results: Vec<Result<Document>> = if self.config.parallel {
            titles
                .par_iter()
                .map(|title| self.merge_title(title, &mut NoopObserver))
                .collect()
        } else {
            titles
                .iter()
                .map(|title| self.merge_title(title, &mut NoopObserver))
                .collect()
        };
        self.apply_policy(results)
    }

    /// Sequential [`Self::documents`] reporting each stage to `observer`
    pub fn documents_observed(
        &self,
        titles: &[String],
        observer: &mut impl PipelineObserver,
    ) -> Result<Vec<Document>> {
        let results = titles
            .iter()
            .map(|title| self.merge_title(title, observer))
            .collect();
        self.apply_policy(results)
    }

    fn apply_policy(&self, results: Vec<Result<Document>>) -> Result<Vec<Document>> {
        let mut docs = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(doc) => docs.push(doc),
                Err(err) if self.config.failure_policy == FailurePolicy::SkipDocument => {
                    warn!(error = %err, "skipping document");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(docs)
    }

    /// Word counts for one year's titles
    pub fn process_year(&self, titles: &[String]) -> Result<YearCounts> {
        let docs = self.documents(titles)?;
        Ok(self.aggregator().aggregate_year(&docs))
    }

    /// [`Self::process_year`] with stage callbacks; always sequential
    pub fn process_year_observed(
        &self,
        titles: &[String],
        observer: &mut impl PipelineObserver,
    ) -> Result<YearCounts> {
        let docs = self.documents_observed(titles, observer)?;
        Ok(self.aggregator().aggregate_year(&docs))
    }

    /// Word counts for every year of `corpus`
    pub fn process_corpus(&self, corpus: &Corpus) -> Result<WordFreqByYear> {
        let years: Vec<(&str, &[String])> = corpus.iter().collect();
        let counted: Vec<Result<(String, YearCounts)>> = if self.config.parallel {
            years
                .par_iter()
                .map(|(year, titles)| self.count_year(year, titles))
                .collect()
        } else {
            years
                .iter()
                .map(|(year, titles)| self.count_year(year, titles))
                .collect()
        };
        counted.into_iter().collect()
    }

    fn count_year(&self, year: &str, titles: &[String]) -> Result<(String, YearCounts)> {
        let counts = self.process_year(titles)?;
        info!(
            year,
            titles = titles.len(),
            words = counts.len(),
            tokens = counts.values().sum::<u64>(),
            "year counted"
        );
        Ok((year.to_string(), counts))
    }

    fn aggregator(&self) -> FrequencyAggregator<'_> {
        FrequencyAggregator::new(&self.vocab, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::observer::StageTimingObserver;
    use crate::pipeline::traits::NoopPass;

    fn titles(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn small_vocab() -> Vocabulary {
        Vocabulary::empty()
            .with_stopwords(StopwordFilter::from_list(&["and", "the"]))
            .with_known_acronyms(&["nato"])
            .with_custom_terms(CustomTermSet::from_terms(&[&["Cold", "War"]]))
    }

    fn expected_1990() -> YearCounts {
        [("NATO", 2), ("cold war", 1), ("expansion", 1)]
            .into_iter()
            .map(|(w, c)| (w.to_string(), c))
            .collect()
    }

    #[test]
    fn test_end_to_end_year() {
        let wf = WordFreq::with_vocabulary(RuleAnnotator::new(), small_vocab());
        let counts = wf
            .process_year(&titles(&["NATO and the Cold War", "NATO Expansion"]))
            .unwrap();
        assert_eq!(counts, expected_1990());
    }

    #[test]
    fn test_end_to_end_with_built_in_vocabulary() {
        let wf = WordFreq::new(RuleAnnotator::new());
        let counts = wf
            .process_year(&titles(&["NATO and the Cold War", "NATO Expansion"]))
            .unwrap();
        assert_eq!(counts, expected_1990());
    }

    #[test]
    fn test_quoted_words_count_as_plain_words() {
        let wf = WordFreq::new(RuleAnnotator::new());
        let counts = wf
            .process_year(&titles(&[
                "Beyond 'Realism'",
                "Realism",
                "The \u{2018}New\u{2019} Europe",
            ]))
            .unwrap();
        let expected: YearCounts = [("realism", 2), ("new", 1), ("europe", 1)]
            .into_iter()
            .map(|(w, c)| (w.to_string(), c))
            .collect();
        assert_eq!(counts, expected);
    }

    #[test]
    fn test_process_corpus() {
        let mut corpus = Corpus::new();
        corpus.insert("1990", titles(&["NATO and the Cold War", "NATO Expansion"]));
        corpus.insert("1991", titles(&[]));

        let wf = WordFreq::with_vocabulary(RuleAnnotator::new(), small_vocab());
        let out = wf.process_corpus(&corpus).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out["1990"], expected_1990());
        assert!(out["1991"].is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut corpus = Corpus::new();
        corpus.insert("1990", titles(&["NATO and the Cold War", "NATO Expansion"]));
        corpus.insert("1991", titles(&["After the Cold War", "Sino-Soviet Relations"]));

        let seq = WordFreq::new(RuleAnnotator::new());
        let par = WordFreq::new(RuleAnnotator::new())
            .with_config(WordFreqConfig::default().with_parallel(true));
        assert_eq!(
            seq.process_corpus(&corpus).unwrap(),
            par.process_corpus(&corpus).unwrap()
        );
    }

    #[test]
    fn test_annotation_failure_aborts_by_default() {
        let annotator = JsonAnnotator::from_json("{}").unwrap();
        let wf = WordFreq::new(annotator);
        let err = wf.process_year(&titles(&["Unknown Title"])).unwrap_err();
        assert!(matches!(err, WordFreqError::AnnotationFailure { .. }));
    }

    #[test]
    fn test_skip_document_policy() {
        let annotator = JsonAnnotator::from_json(
            r#"{ "Détente": [ { "text": "Détente", "idx": 0, "pos": "NOUN" } ] }"#,
        )
        .unwrap();
        let config = WordFreqConfig::default().with_failure_policy(FailurePolicy::SkipDocument);
        let wf = WordFreq::new(annotator).with_config(config);
        let counts = wf.process_year(&titles(&["Détente", "Unknown Title"])).unwrap();
        assert_eq!(counts.get("détente"), Some(&1));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_custom_pipeline() {
        let vocab = small_vocab();
        let pipeline = PipelineBuilder::from_vocabulary(&vocab)
            .entities(NoopPass)
            .build();
        let wf = WordFreq::with_vocabulary(RuleAnnotator::new(), vocab).with_pipeline(pipeline);
        let counts = wf.process_year(&titles(&["The Cold War"])).unwrap();
        assert_eq!(counts.get("cold"), Some(&1));
        assert_eq!(counts.get("war"), Some(&1));
        assert_eq!(counts.get("cold war"), None);
    }

    #[test]
    fn test_observed_run_reports_stages() {
        let wf = WordFreq::with_vocabulary(RuleAnnotator::new(), small_vocab());
        let mut obs = StageTimingObserver::new();
        let counts = wf
            .process_year_observed(&titles(&["NATO and the Cold War"]), &mut obs)
            .unwrap();
        assert_eq!(counts.get("cold war"), Some(&1));
        assert_eq!(obs.stage_runs(), 4);
        assert_eq!(obs.merged_by_stage()[0].1, 1);
    }
}
