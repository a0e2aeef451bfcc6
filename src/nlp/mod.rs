//! Natural Language Processing components
//!
//! This module provides tokenization, stopword filtering, and word
//! normalization.

pub mod normalize;
pub mod stopwords;
pub mod tokenizer;
