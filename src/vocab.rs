//! Curated vocabulary tables
//!
//! Everything the merge passes, the normalizer, and the aggregator look up
//! lives here as plain data. [`Vocabulary::default`] carries the curated
//! tables for the journal corpus; tests build small fixtures instead.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::nlp::stopwords::StopwordFilter;
use crate::types::{Document, PosTag, Span};

/// Literal multi-token phrases merged as one word
#[derive(Debug, Clone, Default)]
pub struct CustomTermSet {
    terms: Vec<Vec<String>>,
    /// First token text -> indices into `terms`
    by_first: FxHashMap<String, Vec<usize>>,
}

impl CustomTermSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from token tuples, e.g. `&[&["United", "States"]]`
    pub fn from_terms(terms: &[&[&str]]) -> Self {
        let mut set = Self::new();
        for term in terms {
            set.insert(term.iter().map(|t| t.to_string()).collect());
        }
        set
    }

    /// Add a phrase. Empty phrases and duplicates are ignored.
    pub fn insert(&mut self, term: Vec<String>) {
        let Some(first) = term.first().cloned() else {
            return;
        };
        if self.terms.contains(&term) {
            return;
        }
        self.by_first.entry(first).or_default().push(self.terms.len());
        self.terms.push(term);
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.terms.iter().map(|t| t.as_slice())
    }

    /// Every window of `doc` whose token texts equal a phrase, position by
    /// position and case-sensitively. Overlapping matches are all returned.
    pub fn find_matches(&self, doc: &Document) -> Vec<Span> {
        let tokens = doc.tokens();
        let mut spans = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(candidates) = self.by_first.get(&token.text) else {
                continue;
            };
            for &term_idx in candidates {
                let term = &self.terms[term_idx];
                let end = i + term.len();
                if end > tokens.len() {
                    continue;
                }
                let matched = tokens[i..end]
                    .iter()
                    .zip(term)
                    .all(|(token, word)| token.text == *word);
                if matched {
                    spans.push(Span::new(i, end));
                }
            }
        }
        spans
    }
}

/// All lookup tables used by the pipeline
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub stopwords: StopwordFilter,
    pub skip_pos: FxHashSet<PosTag>,
    /// Lower-case forms re-upper-cased by the normalizer
    pub known_acronyms: FxHashSet<String>,
    pub typo_corrections: FxHashMap<String, String>,
    /// Canonical forms never counted
    pub block_list: FxHashSet<String>,
    pub custom_terms: CustomTermSet,
    /// Token text merged with its predecessor by the modifier pass
    pub modifier_marker: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            stopwords: StopwordFilter::nltk_english(),
            skip_pos: DEFAULT_SKIP_POS.iter().copied().collect(),
            known_acronyms: to_set(DEFAULT_KNOWN_ACRONYMS),
            typo_corrections: DEFAULT_TYPO_CORRECTIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            block_list: to_set(DEFAULT_BLOCK_LIST),
            custom_terms: CustomTermSet::from_terms(DEFAULT_CUSTOM_TERMS),
            modifier_marker: DEFAULT_MODIFIER_MARKER.to_string(),
        }
    }
}

impl Vocabulary {
    /// Tables with no entries: no stopwords, no terms, no corrections.
    /// The skip-POS set and modifier marker keep their defaults.
    pub fn empty() -> Self {
        Self {
            stopwords: StopwordFilter::empty(),
            skip_pos: DEFAULT_SKIP_POS.iter().copied().collect(),
            known_acronyms: FxHashSet::default(),
            typo_corrections: FxHashMap::default(),
            block_list: FxHashSet::default(),
            custom_terms: CustomTermSet::new(),
            modifier_marker: DEFAULT_MODIFIER_MARKER.to_string(),
        }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_known_acronyms(mut self, acronyms: &[&str]) -> Self {
        self.known_acronyms = to_set(acronyms);
        self
    }

    pub fn with_typo_corrections(mut self, corrections: &[(&str, &str)]) -> Self {
        self.typo_corrections = corrections
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn with_block_list(mut self, words: &[&str]) -> Self {
        self.block_list = to_set(words);
        self
    }

    pub fn with_custom_terms(mut self, terms: CustomTermSet) -> Self {
        self.custom_terms = terms;
        self
    }

    pub fn with_modifier_marker(mut self, marker: impl Into<String>) -> Self {
        self.modifier_marker = marker.into();
        self
    }
}

fn to_set(words: &[&str]) -> FxHashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

pub const DEFAULT_MODIFIER_MARKER: &str = "Relations";

pub const DEFAULT_SKIP_POS: &[PosTag] = &[
    PosTag::Adp,
    PosTag::Det,
    PosTag::Punct,
    PosTag::Cconj,
    PosTag::Part,
    PosTag::Sconj,
    PosTag::Sym,
    PosTag::Space,
    PosTag::Num,
];

pub const DEFAULT_KNOWN_ACRONYMS: &[&str] = &[
    "nato", "un", "eu", "eec", "asean", "apec", "opec", "wto", "imf", "salt ii", "dmk-aiadmk",
    "dod", "r2p",
];

pub const DEFAULT_TYPO_CORRECTIONS: &[(&str, &str)] = &[
    ("afer", "after"),
    ("amazona", "amazonia"),
    ("challanges", "challenges"),
    ("cimes", "crimes"),
    ("commmissions", "commissions"),
    ("commmunity", "community"),
    ("decolonization(s", "decolonization"),
    ("evironmental", "environmental"),
    ("expanson", "expansion"),
    ("faustain", "faustian"),
    ("globaliziation", "globalization"),
    ("humnitarian", "humanitarian"),
    ("incongreuences", "incongruences"),
    ("internatioanl", "international"),
    ("mis)understanding", "misunderstanding"),
    ("multinatioanl", "multinational"),
    ("petrobus", "petrobras"),
    ("rappochement", "rapprochement"),
    ("refletions", "reflections"),
    ("salvadaor", "el salvador"),
    ("tranforming", "transforming"),
    ("transational", "transnational"),
    ("utlilization", "utilization"),
    ("westen", "western"),
    ("ethiopa-eritrea", "ethiopia-eritrea"),
    ("sef-defense", "self-defense"),
];

pub const DEFAULT_BLOCK_LIST: &[&str] = &[
    "rudolf", "bahro", "johannes", "preisinger", "mr.", "51(1/2", "un70", "frei", "miguel",
    "madrid", "reagan", "kennan", "carter", "truman", "milosevic", "blair", "bush", "fujimori",
    "primakov", "alexander", "maliki", "awlaki", "obama", "trump", "greta", "tshilombo",
    "fletcher", "can't", "what's", "uti", "possidetis", "juris", "jus", "bello",
];

pub const DEFAULT_CUSTOM_TERMS: &[&[&str]] = &[
    &["United", "States"],
    &["United", "Nations"],
    &["United", "Kingdom"],
    &["European", "Union"],
    &["World", "Trade", "Organization"],
    &["World", "Bank"],
    &["World", "Order"],
    &["International", "Monetary", "Fund"],
    &["International", "Court"],
    &["Security", "Council"],
    &["General", "Assembly"],
    &["Human", "Rights"],
    &["Cold", "War"],
    &["Civil", "War"],
    &["Gulf", "War"],
    &["Middle", "East"],
    &["South", "Korea"],
    &["North", "Korea"],
    &["South", "Africa"],
    &["Saudi", "Arabia"],
    &["Hong", "Kong"],
    &["Sri", "Lanka"],
    &["Costa", "Rica"],
    &["Puerto", "Rico"],
    &["Soviet", "Union"],
    &["Third", "World"],
    &["El", "Salvador"],
    &["Western", "Europe"],
    &["Eastern", "Europe"],
    &["Latin", "America"],
    &["Berlin", "Wall"],
    &["Persian", "Gulf"],
    &["SALT", "II"],
    &["West", "German"],
    &["Reagan", "Era"],
    &["Weinberger", "Doctrine"],
    &["21st", "Century"],
    &["New", "York"],
    &["People", "'s", "Republic"],
    &["African", "Elephant"],
    &["Basel", "Convention"],
    &["Chemical", "Weapons"],
    &["Southeast", "Asia"],
    &["Northern", "Ireland"],
    &["North", "Sea"],
    &["Western", "Front"],
    &["Panama", "Canal"],
    &["West", "Germany"],
    &["East", "Germany"],
    &["Twentieth", "Anniversary"],
    &["South", "China", "Sea"],
    &["Sub", "-", "Saharan", "Africa"],
    &["Twenty", "-", "First", "Century"],
    &["Autonomous", "Weapon", "Systems"],
    &["International", "Law"],
    &["International", "Relations"],
    &["Natural", "Resources"],
    &["Hazardous", "Waste"],
    &["Organized", "Crime"],
    &["Marshall", "Plan"],
    &["Financial", "Crisis"],
    &["Single", "State"],
    &["Multiparty", "System"],
    &["Case", "Study"],
    &["Land", "Rights"],
    &["War", "Crimes"],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;

    fn doc(words: &[&str]) -> Document {
        let mut text = String::new();
        let mut tokens = Vec::new();
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            tokens.push(Token::new(*word, text.chars().count(), PosTag::Propn, i));
            text.push_str(word);
        }
        Document::new(text, tokens)
    }

    #[test]
    fn test_find_matches_exact_and_case_sensitive() {
        let terms = CustomTermSet::from_terms(&[&["United", "States"]]);

        let spans = terms.find_matches(&doc(&["the", "United", "States", "today"]));
        assert_eq!(spans, vec![Span::new(1, 3)]);

        assert!(terms.find_matches(&doc(&["united", "States"])).is_empty());
        assert!(terms.find_matches(&doc(&["United"])).is_empty());
    }

    #[test]
    fn test_find_matches_reports_overlaps() {
        let terms = CustomTermSet::from_terms(&[
            &["South", "China", "Sea"],
            &["South", "China"],
            &["China", "Sea"],
        ]);
        let mut spans = terms.find_matches(&doc(&["South", "China", "Sea"]));
        spans.sort();
        assert_eq!(
            spans,
            vec![Span::new(0, 2), Span::new(0, 3), Span::new(1, 3)]
        );
    }

    #[test]
    fn test_insert_ignores_empty_and_duplicates() {
        let mut terms = CustomTermSet::new();
        terms.insert(vec![]);
        terms.insert(vec!["Cold".into(), "War".into()]);
        terms.insert(vec!["Cold".into(), "War".into()]);
        assert_eq!(terms.len(), 1);
    }

    #[test]
    fn test_default_tables_loaded() {
        let vocab = Vocabulary::default();
        assert!(vocab.custom_terms.len() >= 60);
        assert!(vocab.known_acronyms.contains("nato"));
        assert_eq!(vocab.typo_corrections.get("salvadaor").map(String::as_str), Some("el salvador"));
        assert!(vocab.skip_pos.contains(&PosTag::Num));
        assert!(vocab.stopwords.is_stopword("the"));
    }
}
