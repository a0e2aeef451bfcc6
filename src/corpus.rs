//! Year-grouped title corpora
//!
//! The raw input is an issue listing copied from the journal archive:
//! blank-line separated blocks that alternate between a year header such as
//! `Volume 14 (1990)` and the issue entries for that year. Each entry is
//! introduced by a `Download PDF` marker with U+2028 line separators; the
//! title sits between the first and second tab, before any NBSP or newline.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{Result, WordFreqError};

/// Separator in front of every issue entry
pub const ENTRY_SEPARATOR: &str = "-\u{2028}Download PDF\u{2028}\u{2028}\n\t";

/// Entries containing any of these are front matter or reviews, not articles
pub const DEFAULT_FILTER_PHRASES: &[&str] = &[
    "\tTable of Contents",
    "â€¢\tIssue",
    "A Conversation with",
    "Book Reviews",
    "Books Reviews",
    "Books Received",
    "Books Review",
    "Editor's Note",
    "Editors' Note",
    "From the Editor's",
    "Recent Publications",
    "Interview with",
    "Author Index",
    "Forum",
    "Book Review",
    "Book Received",
    "Books in Brief",
    "Errata",
    "Erratum",
    "Reviews",
];

/// Titles grouped by year label, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    years: Vec<(String, Vec<String>)>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a year. A label seen before has its titles replaced in place.
    pub fn insert(&mut self, year: impl Into<String>, titles: Vec<String>) {
        let year = year.into();
        match self.years.iter_mut().find(|(y, _)| *y == year) {
            Some((_, existing)) => {
                warn!(%year, "duplicate year label, replacing its titles");
                *existing = titles;
            }
            None => self.years.push((year, titles)),
        }
    }

    pub fn get(&self, year: &str) -> Option<&[String]> {
        self.years
            .iter()
            .find(|(y, _)| y == year)
            .map(|(_, titles)| titles.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.years
            .iter()
            .map(|(year, titles)| (year.as_str(), titles.as_slice()))
    }

    /// Number of years
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn title_count(&self) -> usize {
        self.years.iter().map(|(_, titles)| titles.len()).sum()
    }

    /// Load `{"1990": ["title", ...], ...}`. Years come out sorted.
    pub fn from_json(json: &str) -> Result<Self> {
        let by_year: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self {
            years: by_year.into_iter().collect(),
        })
    }

    /// Read a corpus file: `.json` as a year map, anything else as an issue
    /// listing.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&raw)
        } else {
            parse_issue_listing(&raw)
        }
    }
}

/// Issue-listing parser with a configurable filter list
#[derive(Debug, Clone)]
pub struct CorpusParser {
    filter_phrases: Vec<String>,
}

impl Default for CorpusParser {
    fn default() -> Self {
        Self::with_filter_phrases(DEFAULT_FILTER_PHRASES)
    }
}

impl CorpusParser {
    pub fn with_filter_phrases(phrases: &[&str]) -> Self {
        Self {
            filter_phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn add_filter_phrase(&mut self, phrase: impl Into<String>) {
        self.filter_phrases.push(phrase.into());
    }

    fn is_filtered(&self, entry: &str) -> bool {
        self.filter_phrases.iter().any(|p| entry.contains(p.as_str()))
    }

    pub fn parse(&self, raw: &str) -> Result<Corpus> {
        let blocks: Vec<&str> = raw.trim_end_matches('\n').split("\n\n").collect();
        let mut corpus = Corpus::new();

        for (pair, chunk) in blocks.chunks(2).enumerate() {
            let header_block = pair * 2;
            let year = year_label(chunk[0])
                .ok_or_else(|| WordFreqError::malformed(header_block, "year header has no '('"))?;
            let Some(listing) = chunk.get(1) else {
                return Err(WordFreqError::malformed(
                    header_block,
                    format!("year {year} has no issue listing"),
                ));
            };

            let mut titles = Vec::new();
            for entry in listing.split(ENTRY_SEPARATOR).skip(1) {
                if self.is_filtered(entry) {
                    continue;
                }
                let title = entry_title(entry).ok_or_else(|| {
                    WordFreqError::malformed(header_block + 1, "issue entry has no tab")
                })?;
                titles.push(title.to_string());
            }
            debug!(%year, titles = titles.len(), "parsed year");
            corpus.insert(year, titles);
        }

        Ok(corpus)
    }
}

/// Parse an issue listing with the default filter phrases.
pub fn parse_issue_listing(raw: &str) -> Result<Corpus> {
    CorpusParser::default().parse(raw)
}

/// Text inside the first `(`, up to the next `)` or the end of the block
fn year_label(header: &str) -> Option<&str> {
    let (_, rest) = header.split_once('(')?;
    Some(rest.split(')').next().unwrap_or(rest))
}

/// Before the first NBSP, between the first and second tab, before the first
/// newline
fn entry_title(entry: &str) -> Option<&str> {
    let head = entry.split('\u{a0}').next().unwrap_or(entry);
    let field = head.split('\t').nth(1)?;
    Some(field.split('\n').next().unwrap_or(field))
}
