//! Merge pipeline and vocabulary configuration
//!
//! - [`traits`]: the [`MergePass`] stage trait
//! - [`runner`]: [`MergePipeline`], running the four passes in order
//! - [`observer`]: stage-boundary hooks
//! - [`spec`] / [`validation`]: JSON vocabulary specs and their checks

pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;

pub use error_code::ErrorCode;
pub use errors::VocabularySpecError;
pub use observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use runner::{IdentityPipeline, MergePipeline, PipelineBuilder, StandardPipeline};
pub use spec::{StopwordList, VocabularySpec};
pub use traits::{MergePass, NoopPass};
pub use validation::{Severity, ValidationEngine, ValidationReport, ValidationRule};
