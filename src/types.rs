//! Core data types
//!
//! Tokens, documents, spans, and the run configuration shared by every
//! stage of the word-frequency pipeline.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Universal Dependencies part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    Space,
    X,
}

impl PosTag {
    /// Parse a UD tag string (`"PROPN"`, `"adp"`, ...). Unknown tags map to `X`.
    pub fn from_ud(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "ADJ" => PosTag::Adj,
            "ADP" => PosTag::Adp,
            "ADV" => PosTag::Adv,
            "AUX" => PosTag::Aux,
            "CCONJ" | "CONJ" => PosTag::Cconj,
            "DET" => PosTag::Det,
            "INTJ" => PosTag::Intj,
            "NOUN" => PosTag::Noun,
            "NUM" => PosTag::Num,
            "PART" => PosTag::Part,
            "PRON" => PosTag::Pron,
            "PROPN" => PosTag::Propn,
            "PUNCT" => PosTag::Punct,
            "SCONJ" => PosTag::Sconj,
            "SYM" => PosTag::Sym,
            "VERB" => PosTag::Verb,
            "SPACE" => PosTag::Space,
            _ => PosTag::X,
        }
    }

    /// The UD tag string
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::Space => "SPACE",
            PosTag::X => "X",
        }
    }
}

/// Named-entity classes (OntoNotes labels as emitted by spaCy's English models)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Norp,
    Fac,
    Org,
    Gpe,
    Loc,
    Product,
    Event,
    WorkOfArt,
    Law,
    Language,
    Date,
    Time,
    Percent,
    Money,
    Quantity,
    Ordinal,
    Cardinal,
    Misc,
}

impl EntityLabel {
    /// Parse an entity label. Empty strings mean "no entity".
    pub fn parse(label: &str) -> Option<Self> {
        let label = match label.to_ascii_uppercase().as_str() {
            "" => return None,
            "PERSON" | "PER" => EntityLabel::Person,
            "NORP" => EntityLabel::Norp,
            "FAC" => EntityLabel::Fac,
            "ORG" => EntityLabel::Org,
            "GPE" => EntityLabel::Gpe,
            "LOC" => EntityLabel::Loc,
            "PRODUCT" => EntityLabel::Product,
            "EVENT" => EntityLabel::Event,
            "WORK_OF_ART" => EntityLabel::WorkOfArt,
            "LAW" => EntityLabel::Law,
            "LANGUAGE" => EntityLabel::Language,
            "DATE" => EntityLabel::Date,
            "TIME" => EntityLabel::Time,
            "PERCENT" => EntityLabel::Percent,
            "MONEY" => EntityLabel::Money,
            "QUANTITY" => EntityLabel::Quantity,
            "ORDINAL" => EntityLabel::Ordinal,
            "CARDINAL" => EntityLabel::Cardinal,
            _ => EntityLabel::Misc,
        };
        Some(label)
    }
}

/// A token with character offsets, tag, and entity annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text, always equal to the source slice at `start..start + len`
    pub text: String,
    /// Character offset of the first character in the source title
    pub start: usize,
    /// Length in characters
    pub len: usize,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Entity label, if the token is part of a mention
    pub entity: Option<EntityLabel>,
    /// True when this token opens an entity mention (IOB "B")
    pub entity_begin: bool,
    /// Position within the current token sequence
    pub index: usize,
}

impl Token {
    /// Create a token without entity annotation
    pub fn new(text: impl Into<String>, start: usize, pos: PosTag, index: usize) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            start,
            len,
            pos,
            entity: None,
            entity_begin: false,
            index,
        }
    }

    /// Attach an entity label
    pub fn with_entity(mut self, label: EntityLabel, begin: bool) -> Self {
        self.entity = Some(label);
        self.entity_begin = begin;
        self
    }

    /// Character offset one past the last character
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// True if `next` starts exactly where this token ends (no whitespace between)
    #[inline]
    pub fn touches(&self, next: &Token) -> bool {
        self.end() == next.start
    }

    pub fn is_person(&self) -> bool {
        self.entity == Some(EntityLabel::Person)
    }
}

/// Half-open token-index range `[start, end)` proposed for merging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of tokens covered
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the two ranges share at least one token index
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One annotated title: the shared source text plus its token sequence.
///
/// Documents are snapshots. Merge passes borrow one and return a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: Arc<str>,
    tokens: Vec<Token>,
}

impl Document {
    /// Build a document. Token positions are re-indexed to `0..n`.
    pub fn new(text: impl Into<Arc<str>>, mut tokens: Vec<Token>) -> Self {
        for (i, token) in tokens.iter_mut().enumerate() {
            token.index = i;
        }
        Self {
            text: text.into(),
            tokens,
        }
    }

    /// Same source text, new token sequence
    pub fn with_tokens(&self, tokens: Vec<Token>) -> Self {
        Self::new(Arc::clone(&self.text), tokens)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Source slice between two character offsets
    pub fn slice_chars(&self, start: usize, end: usize) -> Option<&str> {
        char_slice(&self.text, start, end)
    }
}

/// Slice `text` by character offsets, `None` when out of bounds
pub fn char_slice(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let mut indices = text.char_indices().map(|(b, _)| b).chain(std::iter::once(text.len()));
    let from = indices.nth(start)?;
    let to = if end == start {
        from
    } else {
        indices.nth(end - start - 1)?
    };
    text.get(from..to)
}

/// Word → count for one year
pub type YearCounts = FxHashMap<String, u64>;

/// Year label → word counts
pub type WordFreqByYear = FxHashMap<String, YearCounts>;

/// What to do when the annotator rejects a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole batch
    #[default]
    Abort,
    /// Log and skip the document, keep processing the year
    SkipDocument,
}

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordFreqConfig {
    /// A person name must occur more than this many times in a year to be kept
    pub person_threshold: u64,
    /// Words shorter than this (in characters) are dropped unless upper-case
    pub min_word_chars: usize,
    /// Annotation failure handling
    pub failure_policy: FailurePolicy,
    /// Process documents and years on the rayon thread pool
    pub parallel: bool,
}

impl Default for WordFreqConfig {
    fn default() -> Self {
        Self {
            person_threshold: 3,
            min_word_chars: 3,
            failure_policy: FailurePolicy::Abort,
            parallel: false,
        }
    }
}

impl WordFreqConfig {
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_person_threshold(mut self, threshold: u64) -> Self {
        self.person_threshold = threshold;
        self
    }
}
