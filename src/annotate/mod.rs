//! Annotation providers
//!
//! An [`Annotator`] turns a title into a [`Document`]: tokens with character
//! offsets, UD part-of-speech tags, and entity labels. Multi-token entity
//! mentions are marked IOB-style (`entity_begin` on the first token).
//!
//! Two providers ship with the crate:
//! - [`JsonAnnotator`]: replays annotations exported from spaCy.
//! - [`crate::nlp::tokenizer::RuleAnnotator`]: a built-in rule-based fallback.

pub mod json;

pub use json::{AnnotatedToken, JsonAnnotator};

use crate::errors::Result;
use crate::types::Document;

/// Title → annotated document.
///
/// Implementations must be shareable across threads so documents can be
/// annotated in parallel.
pub trait Annotator: Send + Sync {
    fn annotate(&self, title: &str) -> Result<Document>;
}

impl<A: Annotator + ?Sized> Annotator for &A {
    fn annotate(&self, title: &str) -> Result<Document> {
        (**self).annotate(title)
    }
}

impl<A: Annotator + ?Sized> Annotator for Box<A> {
    fn annotate(&self, title: &str) -> Result<Document> {
        (**self).annotate(title)
    }
}
