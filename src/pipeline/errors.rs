//! Structured diagnostics for vocabulary specs.

use std::fmt;

use serde::Serialize;

use super::error_code::ErrorCode;

/// One problem found in a [`super::spec::VocabularySpec`].
///
/// `path` is a JSON pointer into the vocabulary JSON (`/custom_terms/3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularySpecError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl VocabularySpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for VocabularySpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for VocabularySpecError {}
