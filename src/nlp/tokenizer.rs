//! Rule-based tokenization and tagging
//!
//! A dependency-free stand-in for a statistical annotator. Tokens come from
//! Unicode word boundaries (UAX #29) with English clitics split off
//! (`can't` -> `ca` + `n't`, `Obama's` -> `Obama` + `'s`) and dotted
//! initials kept whole (`U.S.`). Tags come from a closed-class lexicon,
//! character classes, and capitalization. Only PERSON entities are produced,
//! from an optional name gazetteer.

use rustc_hash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::annotate::Annotator;
use crate::errors::Result;
use crate::types::{Document, EntityLabel, PosTag, Token};

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];
const QUOTES: [char; 6] = ['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{AB}', '\u{BB}'];
const DASHES: [&str; 3] = ["-", "\u{2013}", "\u{2014}"];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "its", "their", "his", "her", "our",
    "my", "your", "every", "each", "no", "some", "any", "another",
];
const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "for", "with", "from", "to", "by", "about", "against", "between",
    "into", "through", "during", "before", "after", "over", "under", "among", "amid", "toward",
    "towards", "beyond", "within", "without", "across", "despite", "via", "versus", "vs.",
    "upon", "beneath", "behind", "around", "along", "since",
];
const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "&"];
const SUBORDINATORS: &[&str] = &[
    "if", "because", "while", "although", "though", "whether", "unless", "than", "as", "when",
];
const PRONOUNS: &[&str] = &[
    "i", "we", "you", "he", "she", "it", "they", "me", "us", "him", "them", "who", "what",
    "which", "whom", "whose", "itself", "themselves",
];
const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "has", "have", "had", "do", "does", "did",
    "can", "ca", "could", "will", "wo", "would", "shall", "should", "may", "might", "must",
];
const CLITICS: &[&str] = &["s", "re", "ve", "ll", "d", "m", "t"];

/// Rule-based [`Annotator`]
#[derive(Debug, Clone, Default)]
pub struct RuleAnnotator {
    person_names: FxHashSet<String>,
}

impl RuleAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens whose text is one of `names` are labeled PERSON. Adjacent
    /// name tokens form one mention.
    pub fn with_person_names(mut self, names: &[&str]) -> Self {
        self.person_names.extend(names.iter().map(|n| n.to_string()));
        self
    }

    /// Names from a listing, one per line. Multi-word names contribute each
    /// word; blank lines and `#` comments are ignored.
    pub fn with_person_list(mut self, listing: &str) -> Self {
        let names = listing
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .flat_map(str::split_whitespace);
        self.person_names.extend(names.map(str::to_string));
        self
    }

    pub fn person_name_count(&self) -> usize {
        self.person_names.len()
    }

    /// Split a title into `(text, char_start)` pieces
    pub fn tokenize(&self, title: &str) -> Vec<(String, usize)> {
        let mut pieces: Vec<(String, usize)> = Vec::new();
        let mut char_pos = 0;
        let mut byte_pos = 0;

        for (byte_idx, segment) in title.split_word_bound_indices() {
            char_pos += title[byte_pos..byte_idx].chars().count();
            byte_pos = byte_idx;

            if !segment.chars().all(char::is_whitespace) {
                // "U.S" + "." -> "U.S."
                let joins_initials = segment == "."
                    && pieces.last().is_some_and(|(prev, start)| {
                        start + prev.chars().count() == char_pos && is_partial_initials(prev)
                    });
                if joins_initials {
                    if let Some((prev, _)) = pieces.last_mut() {
                        prev.push('.');
                    }
                } else {
                    split_clitic(segment, char_pos, &mut pieces);
                }
            }
        }
        pieces
    }

    fn tag(&self, text: &str, prev: Option<&str>) -> PosTag {
        let lower = text.to_lowercase();
        let bare = lower.replace('\u{2019}', "'");

        if bare == "n't" {
            return PosTag::Part;
        }
        // A bare or non-clitic apostrophe is a quote mark
        if let Some(clitic) = bare.strip_prefix('\'').filter(|c| CLITICS.contains(c)) {
            return match clitic {
                "s" if prev.is_some_and(|p| AUXILIARIES.contains(&p) || PRONOUNS.contains(&p)) => {
                    PosTag::Aux
                }
                "s" | "t" => PosTag::Part,
                _ => PosTag::Aux,
            };
        }
        if DASHES.contains(&text) || text.chars().all(is_punctuation) {
            return PosTag::Punct;
        }
        if text.chars().all(|c| is_symbol(c) || c.is_ascii_punctuation()) {
            return PosTag::Sym;
        }
        if text.chars().all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '/')) {
            return PosTag::Num;
        }
        if DETERMINERS.contains(&lower.as_str()) {
            PosTag::Det
        } else if ADPOSITIONS.contains(&lower.as_str()) {
            PosTag::Adp
        } else if COORDINATORS.contains(&lower.as_str()) {
            PosTag::Cconj
        } else if SUBORDINATORS.contains(&lower.as_str()) {
            PosTag::Sconj
        } else if PRONOUNS.contains(&lower.as_str()) {
            PosTag::Pron
        } else if AUXILIARIES.contains(&lower.as_str()) {
            PosTag::Aux
        } else if text.chars().next().is_some_and(char::is_uppercase) {
            PosTag::Propn
        } else {
            PosTag::Noun
        }
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&self, title: &str) -> Result<Document> {
        let pieces = self.tokenize(title);
        let mut tokens: Vec<Token> = Vec::with_capacity(pieces.len());
        let mut prev_lower: Option<String> = None;

        for (i, (text, start)) in pieces.into_iter().enumerate() {
            let pos = self.tag(&text, prev_lower.as_deref());
            let mut token = Token::new(text, start, pos, i);

            if self.person_names.contains(&token.text) {
                let continues = tokens.last().is_some_and(|p| p.is_person());
                token = token.with_entity(EntityLabel::Person, !continues);
            }
            prev_lower = Some(token.text.to_lowercase());
            tokens.push(token);
        }

        Ok(Document::new(title, tokens))
    }
}

/// Push `segment` at `start`, splitting a trailing English clitic
fn split_clitic(segment: &str, start: usize, out: &mut Vec<(String, usize)>) {
    let chars: Vec<char> = segment.chars().collect();

    // "can't" -> "ca" + "n't"; a bare "n't" stays whole
    if chars.len() >= 3 {
        let split = chars.len() - 3;
        let tail = &chars[split..];
        if tail[0].eq_ignore_ascii_case(&'n')
            && APOSTROPHES.contains(&tail[1])
            && tail[2].eq_ignore_ascii_case(&'t')
        {
            if split > 0 {
                out.push((chars[..split].iter().collect(), start));
            }
            out.push((tail.iter().collect(), start + split));
            return;
        }
    }

    // "Obama's" -> "Obama" + "'s"
    if let Some(pos) = chars.iter().rposition(|c| APOSTROPHES.contains(c)) {
        let suffix: String = chars[pos + 1..].iter().collect::<String>().to_lowercase();
        if pos > 0 && CLITICS.contains(&suffix.as_str()) {
            out.push((chars[..pos].iter().collect(), start));
            out.push((chars[pos..].iter().collect(), start + pos));
            return;
        }
    }

    out.push((segment.to_string(), start));
}

/// `U.S` style: single letters separated by dots, no trailing dot yet
fn is_partial_initials(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.len() >= 3
        && chars.len() % 2 == 1
        && chars.iter().enumerate().all(|(i, c)| {
            if i % 2 == 0 {
                c.is_ascii_alphabetic()
            } else {
                *c == '.'
            }
        })
}

fn is_punctuation(c: char) -> bool {
    (c.is_ascii_punctuation() && !is_symbol(c)) || QUOTES.contains(&c)
}

fn is_symbol(c: char) -> bool {
    matches!(c, '$' | '%' | '+' | '<' | '=' | '>' | '^' | '|' | '~' | '#' | '€' | '£' | '¥')
}
