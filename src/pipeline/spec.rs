//! Vocabulary specification types.
//!
//! A [`VocabularySpec`] is the JSON form of a [`Vocabulary`]: stopwords,
//! skipped tags, acronyms, typo corrections, the block list, curated
//! multi-word terms and the modifier marker. Every table is optional.
//! These types are the input to the [`super::validation::ValidationEngine`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "extend_defaults": true,
//!   "stopword_list": "nltk",
//!   "stopwords": ["via"],
//!   "known_acronyms": ["osce"],
//!   "typo_corrections": { "goverment": "government" },
//!   "block_list": ["kissinger"],
//!   "custom_terms": [["Warsaw", "Pact"]],
//!   "modifier_marker": "Relations",
//!   "strict": false
//! }
//! ```
//!
//! With `extend_defaults` (the default) each table is added to the built-in
//! one. Without it the tables start empty. `skip_pos`, when given, always
//! replaces the built-in tag set.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::validation::ValidationEngine;
use crate::errors::{Result, WordFreqError};
use crate::nlp::stopwords::StopwordFilter;
use crate::types::PosTag;
use crate::vocab::Vocabulary;

fn default_true() -> bool {
    true
}

/// Top-level vocabulary specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularySpec {
    /// Add to the built-in tables instead of replacing them.
    #[serde(default = "default_true")]
    pub extend_defaults: bool,

    /// Base stopword list. Defaults to NLTK when extending, none otherwise.
    #[serde(default)]
    pub stopword_list: Option<StopwordList>,

    /// Extra stopwords on top of the base list.
    #[serde(default)]
    pub stopwords: Vec<String>,

    /// UD tags whose tokens are never counted.
    #[serde(default)]
    pub skip_pos: Option<Vec<String>>,

    #[serde(default)]
    pub known_acronyms: Vec<String>,

    #[serde(default)]
    pub typo_corrections: BTreeMap<String, String>,

    #[serde(default)]
    pub block_list: Vec<String>,

    /// Multi-word terms, each given as its token texts.
    #[serde(default)]
    pub custom_terms: Vec<Vec<String>>,

    #[serde(default)]
    pub modifier_marker: Option<String>,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    /// Used by the strict-mode validation rule.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for VocabularySpec {
    fn default() -> Self {
        Self {
            extend_defaults: true,
            stopword_list: None,
            stopwords: Vec::new(),
            skip_pos: None,
            known_acronyms: Vec::new(),
            typo_corrections: BTreeMap::new(),
            block_list: Vec::new(),
            custom_terms: Vec::new(),
            modifier_marker: None,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Which stopword list to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopwordList {
    /// The NLTK English list.
    Nltk,
    /// No base list.
    None,
}

impl StopwordList {
    pub fn filter(&self) -> StopwordFilter {
        match self {
            Self::Nltk => StopwordFilter::nltk_english(),
            Self::None => StopwordFilter::empty(),
        }
    }
}

impl VocabularySpec {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Validate with `engine`, log warnings, and build the vocabulary.
    pub fn build(&self, engine: &ValidationEngine) -> Result<Vocabulary> {
        let report = engine.validate(self);
        for warning in report.warnings() {
            warn!(%warning, "vocabulary spec warning");
        }
        if report.has_errors() {
            return Err(WordFreqError::InvalidVocabulary(report));
        }
        Ok(self.to_vocabulary())
    }

    /// Build the vocabulary without validation.
    ///
    /// Unknown tags in `skip_pos` become `X`; empty terms are dropped.
    pub fn to_vocabulary(&self) -> Vocabulary {
        let mut vocab = if self.extend_defaults {
            Vocabulary::default()
        } else {
            Vocabulary::empty()
        };

        let base = self.stopword_list.unwrap_or(if self.extend_defaults {
            StopwordList::Nltk
        } else {
            StopwordList::None
        });
        vocab.stopwords = base.filter();
        let extra: Vec<&str> = self.stopwords.iter().map(String::as_str).collect();
        vocab.stopwords.add_stopwords(&extra);

        if let Some(tags) = &self.skip_pos {
            vocab.skip_pos = tags.iter().map(|t| PosTag::from_ud(t)).collect();
        }

        vocab
            .known_acronyms
            .extend(self.known_acronyms.iter().cloned());
        vocab.typo_corrections.extend(
            self.typo_corrections
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        vocab.block_list.extend(self.block_list.iter().cloned());
        for term in &self.custom_terms {
            vocab.custom_terms.insert(term.clone());
        }
        if let Some(marker) = &self.modifier_marker {
            vocab.modifier_marker = marker.clone();
        }
        vocab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::DEFAULT_CUSTOM_TERMS;

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec: VocabularySpec = serde_json::from_str("{}").unwrap();
        assert!(spec.extend_defaults);
        assert!(!spec.strict);
        assert!(spec.skip_pos.is_none());
    }

    #[test]
    fn test_empty_spec_gives_default_vocabulary() {
        let vocab = VocabularySpec::default().to_vocabulary();
        let default = Vocabulary::default();
        assert_eq!(vocab.custom_terms.len(), default.custom_terms.len());
        assert_eq!(vocab.stopwords.len(), default.stopwords.len());
        assert_eq!(vocab.modifier_marker, "Relations");
    }

    #[test]
    fn test_extend_adds_to_defaults() {
        let spec: VocabularySpec = serde_json::from_str(
            r#"{
                "stopwords": ["via"],
                "known_acronyms": ["osce"],
                "custom_terms": [["Warsaw", "Pact"]]
            }"#,
        )
        .unwrap();
        let vocab = spec.to_vocabulary();
        assert!(vocab.stopwords.is_stopword("via"));
        assert!(vocab.stopwords.is_stopword("the"));
        assert!(vocab.known_acronyms.contains("osce"));
        assert!(vocab.known_acronyms.contains("nato"));
        assert_eq!(vocab.custom_terms.len(), DEFAULT_CUSTOM_TERMS.len() + 1);
    }

    #[test]
    fn test_replace_starts_empty() {
        let spec: VocabularySpec = serde_json::from_str(
            r#"{
                "extend_defaults": false,
                "stopwords": ["and"],
                "typo_corrections": { "goverment": "government" },
                "modifier_marker": "Policy"
            }"#,
        )
        .unwrap();
        let vocab = spec.to_vocabulary();
        assert_eq!(vocab.stopwords.len(), 1);
        assert!(!vocab.known_acronyms.contains("nato"));
        assert_eq!(vocab.typo_corrections.len(), 1);
        assert!(vocab.custom_terms.is_empty());
        assert_eq!(vocab.modifier_marker, "Policy");
    }

    #[test]
    fn test_stopword_list_choice() {
        let spec: VocabularySpec = serde_json::from_str(
            r#"{ "extend_defaults": false, "stopword_list": "nltk" }"#,
        )
        .unwrap();
        let vocab = spec.to_vocabulary();
        assert_eq!(vocab.stopwords.len(), StopwordFilter::nltk_english().len());

        let spec: VocabularySpec =
            serde_json::from_str(r#"{ "stopword_list": "none", "stopwords": ["via"] }"#)
                .unwrap();
        let vocab = spec.to_vocabulary();
        assert_eq!(vocab.stopwords.len(), 1);
        assert!(!vocab.stopwords.is_stopword("the"));

        assert!(serde_json::from_str::<VocabularySpec>(r#"{ "stopword_list": "iso" }"#).is_err());
    }

    #[test]
    fn test_skip_pos_replaces() {
        let spec: VocabularySpec =
            serde_json::from_str(r#"{ "skip_pos": ["det", "PUNCT"] }"#).unwrap();
        let vocab = spec.to_vocabulary();
        assert_eq!(vocab.skip_pos.len(), 2);
        assert!(vocab.skip_pos.contains(&PosTag::Det));
        assert!(!vocab.skip_pos.contains(&PosTag::Num));
    }

    #[test]
    fn test_unknown_fields_captured() {
        let spec: VocabularySpec =
            serde_json::from_str(r#"{ "stop_words": ["x"], "strict": true }"#).unwrap();
        assert!(spec.unknown_fields.contains_key("stop_words"));
        assert!(spec.strict);
    }
}
