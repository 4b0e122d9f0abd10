//! Core types shared across Nonprofit Search: the wire-level search result,
//! loaded organization records, per-location datasets, the in-memory index,
//! and the runtime configuration.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_NAME: &str = "Organization Name";
pub const COL_CITY: &str = "City";
pub const COL_STATE: &str = "State";
pub const COL_COUNTRY: &str = "Country";
pub const COL_WEBSITE: &str = "Website";
pub const COL_EIN: &str = "EIN";
pub const COL_PC: &str = "PC";
pub const COL_URL: &str = "URL";

/// Location code under which the international dataset is stored.
pub const INTERNATIONAL_CODE: &str = "INT";

// ---------------------------------------------------------------------------
// Wire type (client side)
// ---------------------------------------------------------------------------

/// One organization as returned by `GET /search`.
///
/// Every field is optional. An absent key, a `null`, and an empty string all
/// mean "omit from rendering". Numeric values (EINs exported as integers) are
/// accepted and kept as their decimal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(
        rename = "Organization Name",
        default,
        deserialize_with = "display_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub organization_name: Option<String>,
    #[serde(rename = "City", default, deserialize_with = "display_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "State", default, deserialize_with = "display_string", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "display_string", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "Website", default, deserialize_with = "display_string", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(rename = "EIN", default, deserialize_with = "display_string", skip_serializing_if = "Option::is_none")]
    pub ein: Option<String>,
}

fn display_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Loaded records (server side)
// ---------------------------------------------------------------------------

/// A single row from a data file: an ordered column -> value list.
///
/// Values are stored lowercased and trimmed so matching never re-normalizes.
/// Empty cells are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgRecord {
    fields: Vec<(String, String)>,
}

impl OrgRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a column. Empty values remove the column.
    pub fn set(&mut self, column: &str, value: &str) {
        let value = clean_text(value);
        match self.fields.iter().position(|(c, _)| c == column) {
            Some(i) if value.is_empty() => {
                self.fields.remove(i);
            }
            Some(i) => self.fields[i].1 = value,
            None if value.is_empty() => {}
            None => self.fields.push((column.to_string(), value)),
        }
    }

    /// Set a column only if it is not already present.
    pub fn set_default(&mut self, column: &str, value: &str) {
        if self.get(column).is_none() {
            self.set(column, value);
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.iter().find(|(c, _)| c == column).map(|(_, v)| v.as_str())
    }

    /// Rename a column in place, keeping its position.
    pub fn rename(&mut self, from: &str, to: &str) {
        if from == to || self.get(from).is_none() {
            return;
        }
        self.fields.retain(|(c, _)| c != to);
        if let Some(entry) = self.fields.iter_mut().find(|(c, _)| c == from) {
            entry.0 = to.to_string();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True if the query occurs in any column value.
    pub fn contains(&self, query: &str) -> bool {
        self.fields.iter().any(|(_, v)| v.contains(query))
    }

    /// Copy of this record with every value title-cased for display.
    pub fn to_display(&self) -> OrgRecord {
        OrgRecord {
            fields: self.fields.iter().map(|(c, v)| (c.clone(), title_case(v))).collect(),
        }
    }
}

impl From<&OrgRecord> for SearchResult {
    fn from(r: &OrgRecord) -> Self {
        let field = |c: &str| r.get(c).map(str::to_string);
        SearchResult {
            organization_name: field(COL_NAME),
            city: field(COL_CITY),
            state: field(COL_STATE),
            country: field(COL_COUNTRY),
            website: field(COL_WEBSITE),
            ein: field(COL_EIN),
        }
    }
}

impl Serialize for OrgRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Lowercase and trim a raw cell for matching.
pub fn clean_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Title-case a value: the first letter of every alphabetic run is uppercased,
/// the rest lowercased. Digits and punctuation break runs (`"o'brien"` ->
/// `"O'Brien"`, `"2nd"` -> `"2Nd"`).
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Datasets and the index
// ---------------------------------------------------------------------------

/// All records loaded for one location code.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub code: String,
    pub source: PathBuf,
    pub records: Vec<OrgRecord>,
}

/// Every loaded dataset keyed by location code (`INT` for international).
#[derive(Debug, Clone, Default)]
pub struct NonprofitIndex {
    pub datasets: BTreeMap<String, Dataset>,
}

impl NonprofitIndex {
    pub fn get(&self, code: &str) -> Option<&Dataset> {
        self.datasets.get(code)
    }

    /// Sorted state/territory codes, excluding the international dataset.
    pub fn state_codes(&self) -> Vec<String> {
        self.datasets.keys().filter(|c| c.as_str() != INTERNATIONAL_CODE).cloned().collect()
    }

    pub fn record_count(&self) -> usize {
        self.datasets.values().map(|d| d.records.len()).sum()
    }

    pub fn has_international(&self) -> bool {
        self.datasets.contains_key(INTERNATIONAL_CODE)
    }
}

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

/// Server configuration. Loaded from `nonprofit-search.toml` or defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Directory holding the `nonprofits_*.csv|txt` files.
    pub data_dir: PathBuf,
    /// Built web UI. `None` = probe `./dist` and `../dist`.
    pub dist: Option<PathBuf>,
    /// Fixed port. `None` = first free port in the default range.
    pub port: Option<u16>,
    /// Bind to 0.0.0.0 instead of 127.0.0.1.
    pub bind_all: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("."), dist: None, port: None, bind_all: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_treats_empty_and_null_as_absent() {
        let json = r#"{"Organization Name": "Food Bank", "City": "", "State": null, "EIN": 123456789, "PC": "x"}"#;
        let r: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.organization_name.as_deref(), Some("Food Bank"));
        assert_eq!(r.city, None);
        assert_eq!(r.state, None);
        assert_eq!(r.ein.as_deref(), Some("123456789"));
        assert_eq!(r.website, None);
    }

    #[test]
    fn record_set_normalizes_and_drops_empty() {
        let mut r = OrgRecord::new();
        r.set(COL_NAME, "  Red CROSS ");
        r.set(COL_CITY, "   ");
        assert_eq!(r.get(COL_NAME), Some("red cross"));
        assert_eq!(r.get(COL_CITY), None);
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn rename_keeps_position() {
        let mut r = OrgRecord::new();
        r.set(COL_NAME, "a");
        r.set(COL_URL, "b.org");
        r.set(COL_CITY, "c");
        r.rename(COL_URL, COL_WEBSITE);
        let cols: Vec<&str> = r.iter().map(|(c, _)| c).collect();
        assert_eq!(cols, vec![COL_NAME, COL_WEBSITE, COL_CITY]);
        assert_eq!(r.get(COL_WEBSITE), Some("b.org"));
    }

    #[test]
    fn rename_replaces_existing_target() {
        let mut r = OrgRecord::new();
        r.set(COL_WEBSITE, "old.org");
        r.set(COL_URL, "new.org");
        r.rename(COL_URL, COL_WEBSITE);
        assert_eq!(r.len(), 1);
        assert_eq!(r.get(COL_WEBSITE), Some("new.org"));
    }

    #[test]
    fn title_case_matches_display_rules() {
        assert_eq!(title_case("american red cross"), "American Red Cross");
        assert_eq!(title_case("o'brien fund"), "O'Brien Fund");
        assert_eq!(title_case("www.example.org"), "Www.Example.Org");
        assert_eq!(title_case("2nd harvest"), "2Nd Harvest");
    }

    #[test]
    fn record_serializes_as_ordered_map() {
        let mut r = OrgRecord::new();
        r.set(COL_NAME, "habitat");
        r.set(COL_STATE, "ca");
        let json = serde_json::to_string(&r.to_display()).unwrap();
        assert_eq!(json, r#"{"Organization Name":"Habitat","State":"Ca"}"#);
    }

    #[test]
    fn state_codes_exclude_international() {
        let mut index = NonprofitIndex::default();
        for code in ["TX", INTERNATIONAL_CODE, "CA"] {
            index.datasets.insert(code.to_string(), Dataset { code: code.to_string(), ..Default::default() });
        }
        assert_eq!(index.state_codes(), vec!["CA".to_string(), "TX".to_string()]);
        assert!(index.has_international());
    }
}
