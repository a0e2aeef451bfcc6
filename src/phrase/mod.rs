//! Phrase merging components
//!
//! This module provides overlap resolution, span contraction, and the four
//! merge passes that decide which token runs count as one word.

pub mod contraction;
pub mod entity;
pub mod hyphen;
pub mod modifier;
pub mod overlap;
pub mod retokenize;

pub use contraction::ContractionMerge;
pub use entity::EntityMerge;
pub use hyphen::HyphenMerge;
pub use modifier::ModifierMerge;
pub use overlap::{greedy_earliest, keep_longest, OverlapPolicy};
