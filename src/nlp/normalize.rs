//! Canonical word forms
//!
//! Maps raw token text to the key used for counting:
//!
//! 1. Dotted initials (`U.S.`) lose their dots and are upper-cased.
//! 2. All-caps ASCII words of two or more letters are kept as acronyms.
//! 3. Anything else is lower-cased, then re-upper-cased if it is a known
//!    acronym (`Nato` -> `NATO`).
//! 4. The typo-correction table is applied to the result.
//!
//! Missing table entries fall through unchanged.

use std::sync::LazyLock;

use regex::Regex;

use crate::vocab::Vocabulary;

static DOTTED_INITIALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]\.)+$").expect("valid regex"));

static ASCII_ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,}$").expect("valid regex"));

/// Normalizer over the acronym and typo tables of a [`Vocabulary`]
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    vocab: &'a Vocabulary,
}

impl<'a> Normalizer<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self { vocab }
    }

    /// Canonical form of `text`, `None` for empty input
    pub fn normalize(&self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }
        let cased = self.case_fold(text);
        let word = match self.vocab.typo_corrections.get(&cased) {
            Some(fixed) => fixed.clone(),
            None => cased,
        };
        (!word.is_empty()).then_some(word)
    }

    /// Steps 1-3: casing rules without typo correction
    pub fn case_fold(&self, text: &str) -> String {
        if DOTTED_INITIALS.is_match(text) {
            return text.replace('.', "").to_uppercase();
        }
        if ASCII_ACRONYM.is_match(text) {
            return text.to_string();
        }
        let lower = text.to_lowercase();
        if self.vocab.known_acronyms.contains(&lower) {
            lower.to_uppercase()
        } else {
            lower
        }
    }
}

/// At least one cased character and no lower-case ones
pub fn is_upper_case(word: &str) -> bool {
    let mut cased = false;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::empty()
            .with_known_acronyms(&["nato", "salt ii", "r2p"])
            .with_typo_corrections(&[("expanson", "expansion"), ("salvadaor", "el salvador")])
    }

    fn norm(text: &str) -> String {
        Normalizer::new(&vocab()).normalize(text).unwrap()
    }

    #[test]
    fn test_dotted_initials() {
        assert_eq!(norm("U.S."), "US");
        assert_eq!(norm("u.n."), "UN");
        // No trailing dot: not initials, plain lower-casing
        assert_eq!(norm("U.S"), "u.s");
        assert_eq!(norm("Mr."), "mr.");
        assert_eq!(norm("U.S.A."), "USA");
        assert_eq!(norm("é.u."), "é.u.");
    }

    #[test]
    fn test_all_caps_kept() {
        assert_eq!(norm("NATO"), "NATO");
        assert_eq!(norm("OPEC"), "OPEC");
        // Single capital letter is not an acronym
        assert_eq!(norm("A"), "a");
    }

    #[test]
    fn test_known_acronym_recased() {
        assert_eq!(norm("Nato"), "NATO");
        assert_eq!(norm("SALT II"), "SALT II");
        assert_eq!(norm("R2P"), "R2P");
    }

    #[test]
    fn test_lowercased_otherwise() {
        assert_eq!(norm("Expansion"), "expansion");
        assert_eq!(norm("Cold War"), "cold war");
        assert_eq!(norm("Twenty-First"), "twenty-first");
    }

    #[test]
    fn test_typo_correction() {
        assert_eq!(norm("Expanson"), "expansion");
        assert_eq!(norm("Salvadaor"), "el salvador");
        assert_eq!(norm("missing"), "missing");
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(Normalizer::new(&vocab()).normalize(""), None);
    }

    #[test]
    fn test_idempotent_at_fixed_point() {
        let v = vocab();
        let n = Normalizer::new(&v);
        for raw in ["U.S.", "Nato", "SALT II", "Salvadaor", "Expanson", "Cold War", "NATO"] {
            let once = n.normalize(raw).unwrap();
            let twice = n.normalize(&once).unwrap();
            assert_eq!(once, twice, "normalize not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_is_upper_case() {
        assert!(is_upper_case("NATO"));
        assert!(is_upper_case("UN"));
        assert!(is_upper_case("U2"));
        assert!(!is_upper_case("51"));
        assert!(!is_upper_case("Un"));
        assert!(!is_upper_case(""));
    }
}
