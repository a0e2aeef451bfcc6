//! Stable error codes for vocabulary spec diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable category of a [`super::errors::VocabularySpecError`].
///
/// Codes are serialized in `snake_case` and never renamed, so tooling can
/// match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A custom term, term token, or marker word is empty.
    EmptyEntry,
    /// A typo correction maps to an empty string.
    EmptyCorrection,
    /// A typo correction produces a word that is itself corrected again.
    CorrectionChain,
    /// A known acronym is not in lower case and can never match.
    NotLowercase,
    /// A part-of-speech tag outside the UD tag set.
    UnknownPosTag,
    /// A field the schema does not recognize.
    UnknownField,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyEntry => "empty_entry",
            Self::EmptyCorrection => "empty_correction",
            Self::CorrectionChain => "correction_chain",
            Self::NotLowercase => "not_lowercase",
            Self::UnknownPosTag => "unknown_pos_tag",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
