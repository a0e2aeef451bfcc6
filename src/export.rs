//! Word-cloud data export
//!
//! Writes the per-year counts as the `DATA` constant loaded by the word
//! cloud page: years ascending, words by count descending with ties broken
//! alphabetically, pretty-printed with non-ASCII text left unescaped.

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::errors::Result;
use crate::types::{WordFreqByYear, YearCounts};

/// Counts in export order
fn sorted_words(counts: &YearCounts) -> Vec<(&str, u64)> {
    let mut words: Vec<(&str, u64)> = counts.iter().map(|(w, &c)| (w.as_str(), c)).collect();
    words.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    words
}

struct OrderedYear<'a>(&'a YearCounts);

impl Serialize for OrderedYear<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let words = sorted_words(self.0);
        let mut map = serializer.serialize_map(Some(words.len()))?;
        for (word, count) in words {
            map.serialize_entry(word, &count)?;
        }
        map.end()
    }
}

struct OrderedData<'a>(&'a WordFreqByYear);

impl Serialize for OrderedData<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut years: Vec<&String> = self.0.keys().collect();
        years.sort();
        let mut map = serializer.serialize_map(Some(years.len()))?;
        for year in years {
            map.serialize_entry(year, &OrderedYear(&self.0[year]))?;
        }
        map.end()
    }
}

/// The bare JSON object
pub fn to_json(data: &WordFreqByYear) -> Result<String> {
    Ok(serde_json::to_string_pretty(&OrderedData(data))?)
}

/// `const DATA = {...};`
pub fn to_javascript(data: &WordFreqByYear) -> Result<String> {
    Ok(format!("const DATA = {};", to_json(data)?))
}

pub fn write_javascript(path: impl AsRef<Path>, data: &WordFreqByYear) -> Result<()> {
    std::fs::write(path, to_javascript(data)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> WordFreqByYear {
        let mut data = WordFreqByYear::default();
        data.insert(
            "1991".to_string(),
            [("détente", 1), ("war", 5), ("alliance", 5)]
                .into_iter()
                .map(|(w, c)| (w.to_string(), c))
                .collect(),
        );
        data.insert(
            "1990".to_string(),
            [("NATO".to_string(), 2)].into_iter().collect(),
        );
        data
    }

    #[test]
    fn test_javascript_layout() {
        let js = to_javascript(&data()).unwrap();
        let expected = "const DATA = {\n  \"1990\": {\n    \"NATO\": 2\n  },\n  \"1991\": {\n    \"alliance\": 5,\n    \"war\": 5,\n    \"détente\": 1\n  }\n};";
        assert_eq!(js, expected);
    }

    #[test]
    fn test_json_parses_back() {
        let json = to_json(&data()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["1991"]["war"], 5);
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(to_javascript(&WordFreqByYear::default()).unwrap(), "const DATA = {};");
    }

    #[test]
    fn test_empty_year_kept() {
        let mut data = WordFreqByYear::default();
        data.insert("2001".to_string(), YearCounts::default());
        assert_eq!(to_json(&data).unwrap(), "{\n  \"2001\": {}\n}");
    }

    #[test]
    fn test_write_javascript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.js");
        write_javascript(&path, &data()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_javascript(&data()).unwrap());
        assert!(written.starts_with("const DATA = {"));
        assert!(written.ends_with("};"));
    }
}
