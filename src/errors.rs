//! Error types for the word-frequency batch

use thiserror::Error;

use crate::pipeline::validation::ValidationReport;

/// Everything that can abort a batch run
#[derive(Debug, Error)]
pub enum WordFreqError {
    /// The annotator could not process a title
    #[error("annotation failed for {title:?}: {reason}")]
    AnnotationFailure { title: String, reason: String },

    /// A year/title block does not have the expected shape
    #[error("malformed corpus entry at block {block}: {reason}")]
    MalformedCorpusEntry { block: usize, reason: String },

    /// A vocabulary spec failed validation
    #[error("invalid vocabulary: {}", summarize(.0))]
    InvalidVocabulary(ValidationReport),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WordFreqError {
    pub fn annotation(title: &str, reason: impl Into<String>) -> Self {
        WordFreqError::AnnotationFailure {
            title: title.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(block: usize, reason: impl Into<String>) -> Self {
        WordFreqError::MalformedCorpusEntry {
            block,
            reason: reason.into(),
        }
    }
}

fn summarize(report: &ValidationReport) -> String {
    report
        .errors()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, WordFreqError>;
