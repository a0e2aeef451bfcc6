//! Pre-computed annotations
//!
//! Replays spaCy output exported as JSON, one token list per title:
//!
//! ```json
//! {
//!   "NATO Expansion": [
//!     { "text": "NATO", "idx": 0, "pos": "PROPN", "ent_type": "ORG", "ent_iob": "B" },
//!     { "text": "Expansion", "idx": 5, "pos": "NOUN" }
//!   ]
//! }
//! ```
//!
//! `idx` is a character offset into the title.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::Annotator;
use crate::errors::{Result, WordFreqError};
use crate::types::{char_slice, Document, EntityLabel, PosTag, Token};

/// One token as exported by spaCy (`token.text`, `token.idx`, `token.pos_`,
/// `token.ent_type_`, `token.ent_iob_`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub text: String,
    pub idx: usize,
    pub pos: String,
    #[serde(default)]
    pub ent_type: String,
    #[serde(default)]
    pub ent_iob: String,
}

/// Annotator backed by a title → tokens table
#[derive(Debug, Clone, Default)]
pub struct JsonAnnotator {
    table: FxHashMap<String, Vec<AnnotatedToken>>,
}

impl JsonAnnotator {
    pub fn from_json(json: &str) -> Result<Self> {
        let table: FxHashMap<String, Vec<AnnotatedToken>> = serde_json::from_str(json)?;
        Ok(Self { table })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, title: impl Into<String>, tokens: Vec<AnnotatedToken>) {
        self.table.insert(title.into(), tokens);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Annotator for JsonAnnotator {
    fn annotate(&self, title: &str) -> Result<Document> {
        let raw = self
            .table
            .get(title)
            .ok_or_else(|| WordFreqError::annotation(title, "no annotation for title"))?;

        let mut tokens = Vec::with_capacity(raw.len());
        let mut prev_label = None;
        for (i, t) in raw.iter().enumerate() {
            let len = t.text.chars().count();
            if char_slice(title, t.idx, t.idx + len) != Some(t.text.as_str()) {
                return Err(WordFreqError::annotation(
                    title,
                    format!("token {:?} does not match the title at offset {}", t.text, t.idx),
                ));
            }
            if let Some(prev) = tokens.last().map(|p: &Token| p.end()) {
                if t.idx < prev {
                    return Err(WordFreqError::annotation(
                        title,
                        format!("token {:?} at offset {} overlaps its predecessor", t.text, t.idx),
                    ));
                }
            }

            let mut token = Token::new(t.text.clone(), t.idx, PosTag::from_ud(&t.pos), i);
            if let Some(label) = EntityLabel::parse(&t.ent_type) {
                // Without IOB info a label change starts a new mention
                let begin = match t.ent_iob.as_str() {
                    "B" => true,
                    "I" => false,
                    _ => prev_label != Some(label),
                };
                token = token.with_entity(label, begin);
                prev_label = Some(label);
            } else {
                prev_label = None;
            }
            tokens.push(token);
        }

        Ok(Document::new(title, tokens))
    }
}
