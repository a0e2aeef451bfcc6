//! Validation engine for vocabulary specifications.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`VocabularySpec`](super::spec::VocabularySpec) and collects every
//! diagnostic into a [`ValidationReport`]. It never short-circuits on the
//! first error, so users see all problems at once.
//!
//! # Quick start
//!
//! ```rust
//! use rapid_wordfreq::pipeline::spec::VocabularySpec;
//! use rapid_wordfreq::pipeline::validation::ValidationEngine;
//!
//! let spec = VocabularySpec::from_json(r#"{ "custom_terms": [[]] }"#).unwrap();
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&spec);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::VocabularySpecError;
use super::spec::VocabularySpec;
use crate::types::PosTag;
use crate::vocab::DEFAULT_TYPO_CORRECTIONS;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding: an error or warning attached to a
/// [`VocabularySpecError`] that carries the code, path, message, and hint.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: VocabularySpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: VocabularySpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: VocabularySpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &VocabularySpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &VocabularySpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of diagnostics (errors + warnings).
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if there are no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`VocabularySpec`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so they can be shared
/// across threads (e.g., in a long-lived validation engine).
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"typo_corrections"`).
    fn name(&self) -> &str;

    /// Inspect `spec` and return any findings.
    fn validate(&self, spec: &VocabularySpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`VocabularySpec`] and collects
/// all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(EmptyEntriesRule));
        engine.add_rule(Box::new(TypoCorrectionsRule));
        engine.add_rule(Box::new(AcronymCaseRule));
        engine.add_rule(Box::new(SkipPosRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &VocabularySpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

/// Escape a key for use as a JSON pointer segment.
fn pointer_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

// ─── 1. No empty terms, term tokens, or marker ──────────────────────────────

struct EmptyEntriesRule;

impl ValidationRule for EmptyEntriesRule {
    fn name(&self) -> &str {
        "empty_entries"
    }

    fn validate(&self, spec: &VocabularySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        for (i, term) in spec.custom_terms.iter().enumerate() {
            if term.is_empty() {
                out.push(ValidationDiagnostic::error(
                    VocabularySpecError::new(
                        ErrorCode::EmptyEntry,
                        format!("/custom_terms/{i}"),
                        "custom term has no tokens",
                    )
                    .with_hint("Remove the entry or list its token texts"),
                ));
                continue;
            }
            for (j, token) in term.iter().enumerate() {
                if token.trim().is_empty() {
                    out.push(ValidationDiagnostic::error(VocabularySpecError::new(
                        ErrorCode::EmptyEntry,
                        format!("/custom_terms/{i}/{j}"),
                        "custom term token is empty",
                    )));
                }
            }
        }

        if matches!(&spec.modifier_marker, Some(m) if m.trim().is_empty()) {
            out.push(ValidationDiagnostic::error(
                VocabularySpecError::new(
                    ErrorCode::EmptyEntry,
                    "/modifier_marker",
                    "modifier marker is empty",
                )
                .with_hint("Omit modifier_marker to keep \"Relations\""),
            ));
        }

        out
    }
}

// ─── 2. Typo corrections must be non-empty and apply once ───────────────────

struct TypoCorrectionsRule;

impl ValidationRule for TypoCorrectionsRule {
    fn name(&self) -> &str {
        "typo_corrections"
    }

    fn validate(&self, spec: &VocabularySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        let is_key = |word: &str| {
            spec.typo_corrections.contains_key(word)
                || (spec.extend_defaults
                    && DEFAULT_TYPO_CORRECTIONS.iter().any(|(k, _)| *k == word))
        };

        for (typo, fixed) in &spec.typo_corrections {
            let path = format!("/typo_corrections/{}", pointer_segment(typo));
            if fixed.trim().is_empty() {
                out.push(ValidationDiagnostic::error(
                    VocabularySpecError::new(
                        ErrorCode::EmptyCorrection,
                        path,
                        format!("\"{typo}\" is corrected to an empty word"),
                    )
                    .with_hint("Add the word to block_list instead"),
                ));
            } else if fixed != typo && is_key(fixed) {
                out.push(ValidationDiagnostic::warning(
                    VocabularySpecError::new(
                        ErrorCode::CorrectionChain,
                        path,
                        format!("\"{typo}\" is corrected to \"{fixed}\", which is corrected again"),
                    )
                    .with_hint("Map the typo straight to the final spelling"),
                ));
            }
        }

        out
    }
}

// ─── 3. Lookup keys must be lower case ──────────────────────────────────────

struct AcronymCaseRule;

impl ValidationRule for AcronymCaseRule {
    fn name(&self) -> &str {
        "acronym_case"
    }

    fn validate(&self, spec: &VocabularySpec) -> Vec<ValidationDiagnostic> {
        let acronyms = spec
            .known_acronyms
            .iter()
            .enumerate()
            .map(|(i, a)| (format!("/known_acronyms/{i}"), a.as_str()));
        let typos = spec
            .typo_corrections
            .keys()
            .map(|k| (format!("/typo_corrections/{}", pointer_segment(k)), k.as_str()));

        acronyms
            .chain(typos)
            .filter(|(_, word)| word.to_lowercase() != *word)
            .map(|(path, word)| {
                ValidationDiagnostic::warning(
                    VocabularySpecError::new(
                        ErrorCode::NotLowercase,
                        path,
                        format!("\"{word}\" is matched after lower-casing and will never match"),
                    )
                    .with_hint(format!("Use \"{}\"", word.to_lowercase())),
                )
            })
            .collect()
    }
}

// ─── 4. skip_pos entries must be UD tags ────────────────────────────────────

struct SkipPosRule;

impl ValidationRule for SkipPosRule {
    fn name(&self) -> &str {
        "skip_pos"
    }

    fn validate(&self, spec: &VocabularySpec) -> Vec<ValidationDiagnostic> {
        let Some(tags) = &spec.skip_pos else {
            return vec![];
        };

        tags.iter()
            .enumerate()
            .filter(|(_, tag)| !tag.eq_ignore_ascii_case("X") && PosTag::from_ud(tag) == PosTag::X)
            .map(|(i, tag)| {
                ValidationDiagnostic::error(
                    VocabularySpecError::new(
                        ErrorCode::UnknownPosTag,
                        format!("/skip_pos/{i}"),
                        format!("\"{tag}\" is not a Universal Dependencies tag"),
                    )
                    .with_hint("Use tags such as ADP, DET, PUNCT, NUM"),
                )
            })
            .collect()
    }
}

// ─── 5. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &VocabularySpec) -> Vec<ValidationDiagnostic> {
        let diag_fn = if spec.strict {
            ValidationDiagnostic::error
        } else {
            ValidationDiagnostic::warning
        };
        let mut keys: Vec<&String> = spec.unknown_fields.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                diag_fn(
                    VocabularySpecError::new(
                        ErrorCode::UnknownField,
                        format!("/{}", pointer_segment(key)),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
